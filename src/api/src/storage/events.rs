//! Event repository for the sports service

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};
use tracing::debug;

use super::database::{CatalogError, Database, Result};
use super::schema::create_events_table;
use super::seed::seed_events;
use crate::query::{assemble, CompiledQuery, Condition, Criteria, Field, QueryError, Status};
use crate::types::{Event, ListEventsRequestFilter};

const EVENTS_LIST: &str = "SELECT id, name, visible, advertised_start_time FROM events";
const EVENTS_GET: &str =
    "SELECT id, name, visible, advertised_start_time FROM events WHERE id = ?1";

/// Sortable event fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Id,
    Name,
    Visible,
    AdvertisedStartTime,
}

impl Field for EventField {
    const ALL: &'static [Self] = &[
        EventField::Id,
        EventField::Name,
        EventField::Visible,
        EventField::AdvertisedStartTime,
    ];
    const START_TIME: Self = EventField::AdvertisedStartTime;

    fn column(self) -> &'static str {
        match self {
            EventField::Id => "id",
            EventField::Name => "name",
            EventField::Visible => "visible",
            EventField::AdvertisedStartTime => "advertised_start_time",
        }
    }
}

impl Criteria for ListEventsRequestFilter {
    type Field = EventField;

    fn conditions(&self) -> Vec<Condition<EventField>> {
        if self.visible_events_only {
            vec![Condition::IsTrue {
                field: EventField::Visible,
            }]
        } else {
            Vec::new()
        }
    }

    fn order_by(&self) -> &str {
        &self.order_by
    }
}

/// Compile the listing query for an event filter without running it
pub fn compile_list_query(
    filter: Option<&ListEventsRequestFilter>,
) -> std::result::Result<CompiledQuery, QueryError> {
    assemble(EVENTS_LIST, filter)
}

/// Insert an event (upsert). `status` is derived and not stored.
pub fn insert_event(conn: &Connection, event: &Event) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO events
        (id, name, visible, advertised_start_time)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            event.id,
            event.name,
            event.visible,
            event.advertised_start_time,
        ],
    )?;
    Ok(())
}

fn scan_event(row: &Row<'_>, now: DateTime<Utc>) -> rusqlite::Result<Event> {
    let advertised_start_time: DateTime<Utc> = row.get(3)?;

    Ok(Event {
        id: row.get(0)?,
        name: row.get(1)?,
        visible: row.get(2)?,
        advertised_start_time,
        status: Status::at(advertised_start_time, now),
    })
}

/// Repository access to sporting events
pub struct EventRepository {
    db: Database,
}

impl EventRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the schema and seed `seed_rows` dummy events into an empty table
    pub fn init(&self, seed_rows: usize) -> Result<()> {
        self.db.init("sports", |conn| {
            create_events_table(conn)?;
            seed_events(conn, seed_rows)
        })
    }

    /// Insert an event (upsert, for testing)
    #[cfg(test)]
    pub fn insert(&self, event: &Event) -> Result<()> {
        let conn = self.db.connection()?;
        insert_event(&conn, event)?;
        Ok(())
    }

    /// List events matching `filter`
    pub fn list(&self, filter: Option<&ListEventsRequestFilter>) -> Result<Vec<Event>> {
        let query = compile_list_query(filter)?;
        debug!(sql = %query.sql, args = query.args.len(), "Listing events");

        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(&query.sql)?;
        let now = Utc::now();

        let events = stmt
            .query_map(params_from_iter(query.args.iter()), |row| scan_event(row, now))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Get a single event by id
    pub fn get(&self, id: i64) -> Result<Event> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(EVENTS_GET)?;
        let now = Utc::now();

        let mut rows = stmt.query_map([id], |row| scan_event(row, now))?;
        let event = rows.next().transpose()?;
        event.ok_or(CatalogError::NotFound { entity: "event", id })
    }
}
