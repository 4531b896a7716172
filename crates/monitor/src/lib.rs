pub mod clock;
pub mod collector;
pub mod config;
pub mod report;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use collector::Collector;
pub use config::MonitorConfig;
pub use store::{SnapshotStore, StoreError};
