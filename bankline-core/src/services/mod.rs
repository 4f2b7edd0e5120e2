//! Service layer - orchestration around the domain model
//!
//! Services coordinate domain logic with the outside world (scenario files,
//! the event log, shared access across threads).

mod demo;
mod event_log;
pub mod scenario;
mod shared;

pub use demo::{generate_demo_accounts, DemoService, DEMO_BANK_NAME};
pub use event_log::{Event, EventLog, EventSummary, Source, EVENT_DB_FILE};
pub use scenario::{
    AccountBalance, OpeningAccount, Operation, OperationOutcome, Scenario, ScenarioReport,
    ScenarioService,
};
pub use shared::{transfer_shared, SharedAccount};
