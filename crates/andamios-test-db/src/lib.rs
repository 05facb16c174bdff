pub mod config;
pub use config::Config;

mod connect;
pub use connect::connect;

mod harness;
pub use harness::WorkerTest;

pub mod manager;
pub use manager::TestDatabaseManager;

pub mod memory;

mod record;
pub use record::WorkerDatabaseRecord;

mod state;
use state::ManagerState;

mod sweep;
pub use sweep::SweepReport;

pub use andamios_core::{
    backend::Backend, BackendKind, CleanupFailure, DatabaseName, Error, Namespace, Result,
    WorkerId,
};
