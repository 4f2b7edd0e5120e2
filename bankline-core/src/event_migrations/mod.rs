//! Event log schema, embedded at compile time
//!
//! Applied in order by [`crate::services::EventLog::open`]; applied names
//! are tracked in `schema_migrations`.

pub const EVENT_MIGRATIONS: &[(&str, &str)] = &[("001_events.sql", include_str!("001_events.sql"))];
