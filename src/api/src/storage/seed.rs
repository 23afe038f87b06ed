//! Dummy catalog data for local runs.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::Connection;

use super::database::Result;
use super::{events, races};
use crate::query::Status;
use crate::types::{Event, Race};

const PLACES: &[&str] = &[
    "Flemington", "Randwick", "Caulfield", "Eagle Farm", "Morphettville", "Ascot", "Rosehill",
    "Moonee Valley", "Doomben", "Ellerslie",
];

const RACE_KINDS: &[&str] = &["Cup", "Stakes", "Handicap", "Plate", "Classic", "Sprint"];

const TEAMS: &[&str] = &[
    "Lions", "Hawks", "Tigers", "Sharks", "Eagles", "Bulldogs", "Storm", "Panthers", "Dragons",
    "Swans",
];

/// Start time within two days either side of now, to the second.
fn random_start(rng: &mut impl Rng) -> chrono::DateTime<Utc> {
    let offset = rng.gen_range(-2 * 24 * 3600..=2 * 24 * 3600);
    let start = Utc::now() + Duration::seconds(offset);
    start - Duration::nanoseconds(start.timestamp_subsec_nanos() as i64)
}

fn has_rows(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(count > 0)
}

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Fill an empty races table with `rows` races, ids `1..=rows`.
pub fn seed_races(conn: &Connection, rows: usize) -> Result<()> {
    if has_rows(conn, "races")? {
        return Ok(());
    }

    let mut rng = rand::thread_rng();

    for id in 1..=rows as i64 {
        let start = random_start(&mut rng);
        let race = Race {
            id,
            meeting_id: rng.gen_range(1..=10),
            name: format!("{} {}", pick(&mut rng, PLACES), pick(&mut rng, RACE_KINDS)),
            number: rng.gen_range(1..=12),
            visible: rng.gen_bool(0.5),
            advertised_start_time: start,
            status: Status::derive(start),
        };
        races::insert_race(conn, &race)?;
    }

    Ok(())
}

/// Fill an empty events table with `rows` events, ids `1..=rows`.
pub fn seed_events(conn: &Connection, rows: usize) -> Result<()> {
    if has_rows(conn, "events")? {
        return Ok(());
    }

    let mut rng = rand::thread_rng();

    for id in 1..=rows as i64 {
        let start = random_start(&mut rng);
        let event = Event {
            id,
            name: format!("{} vs {}", pick(&mut rng, TEAMS), pick(&mut rng, TEAMS)),
            visible: rng.gen_bool(0.5),
            advertised_start_time: start,
            status: Status::derive(start),
        };
        events::insert_event(conn, &event)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::{create_events_table, create_races_table};

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_seed_races() {
        let conn = Connection::open_in_memory().unwrap();
        create_races_table(&conn).unwrap();
        seed_races(&conn, 25).unwrap();
        assert_eq!(count(&conn, "races"), 25);

        let (min, max): (i64, i64) = conn
            .query_row("SELECT MIN(meeting_id), MAX(meeting_id) FROM races", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert!(min >= 1 && max <= 10);
    }

    #[test]
    fn test_seed_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        create_events_table(&conn).unwrap();
        seed_events(&conn, 10).unwrap();
        seed_events(&conn, 10).unwrap();
        assert_eq!(count(&conn, "events"), 10);
    }
}
