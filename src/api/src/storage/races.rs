//! Race repository for the racing service

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};
use tracing::debug;

use super::database::{Database, Result};
use super::schema::create_races_table;
use super::seed::seed_races;
use crate::query::{assemble, CompiledQuery, Condition, Criteria, Field, QueryError, SqlValue, Status};
use crate::types::{ListRacesRequestFilter, Race};

const RACES_LIST: &str =
    "SELECT id, meeting_id, name, number, visible, advertised_start_time FROM races";

/// Sortable race fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceField {
    Id,
    MeetingId,
    Name,
    Number,
    Visible,
    AdvertisedStartTime,
}

impl Field for RaceField {
    const ALL: &'static [Self] = &[
        RaceField::Id,
        RaceField::MeetingId,
        RaceField::Name,
        RaceField::Number,
        RaceField::Visible,
        RaceField::AdvertisedStartTime,
    ];
    const START_TIME: Self = RaceField::AdvertisedStartTime;

    fn column(self) -> &'static str {
        match self {
            RaceField::Id => "id",
            RaceField::MeetingId => "meeting_id",
            RaceField::Name => "name",
            RaceField::Number => "number",
            RaceField::Visible => "visible",
            RaceField::AdvertisedStartTime => "advertised_start_time",
        }
    }
}

impl Criteria for ListRacesRequestFilter {
    type Field = RaceField;

    fn conditions(&self) -> Vec<Condition<RaceField>> {
        let mut conditions = Vec::new();

        if !self.meeting_ids.is_empty() {
            conditions.push(Condition::In {
                field: RaceField::MeetingId,
                values: self.meeting_ids.iter().copied().map(SqlValue::from).collect(),
            });
        }

        if self.visible_races_only {
            conditions.push(Condition::IsTrue {
                field: RaceField::Visible,
            });
        }

        conditions
    }

    fn order_by(&self) -> &str {
        &self.order_by
    }
}

/// Compile the listing query for a race filter without running it
pub fn compile_list_query(
    filter: Option<&ListRacesRequestFilter>,
) -> std::result::Result<CompiledQuery, QueryError> {
    assemble(RACES_LIST, filter)
}

/// Insert a race (upsert). `status` is derived and not stored.
pub fn insert_race(conn: &Connection, race: &Race) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO races
        (id, meeting_id, name, number, visible, advertised_start_time)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            race.id,
            race.meeting_id,
            race.name,
            race.number,
            race.visible,
            race.advertised_start_time,
        ],
    )?;
    Ok(())
}

fn scan_race(row: &Row<'_>, now: DateTime<Utc>) -> rusqlite::Result<Race> {
    let advertised_start_time: DateTime<Utc> = row.get(5)?;

    Ok(Race {
        id: row.get(0)?,
        meeting_id: row.get(1)?,
        name: row.get(2)?,
        number: row.get(3)?,
        visible: row.get(4)?,
        advertised_start_time,
        status: Status::at(advertised_start_time, now),
    })
}

/// Repository access to races
pub struct RaceRepository {
    db: Database,
}

impl RaceRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the schema and seed `seed_rows` dummy races into an empty table
    pub fn init(&self, seed_rows: usize) -> Result<()> {
        self.db.init("racing", |conn| {
            create_races_table(conn)?;
            seed_races(conn, seed_rows)
        })
    }

    /// Insert a race (upsert, for testing)
    #[cfg(test)]
    pub fn insert(&self, race: &Race) -> Result<()> {
        let conn = self.db.connection()?;
        insert_race(&conn, race)?;
        Ok(())
    }

    /// List races matching `filter`
    pub fn list(&self, filter: Option<&ListRacesRequestFilter>) -> Result<Vec<Race>> {
        let query = compile_list_query(filter)?;
        debug!(sql = %query.sql, args = query.args.len(), "Listing races");

        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(&query.sql)?;
        let now = Utc::now();

        let races = stmt
            .query_map(params_from_iter(query.args.iter()), |row| scan_race(row, now))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(races)
    }
}
