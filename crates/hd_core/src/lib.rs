pub mod aggregate;
pub mod clean;
pub mod config;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use config::DashboardConfig;
pub use error::{Error, Result};
pub use filter::Topic;
pub use pipeline::{run, Dashboard, Notice, RunOptions, RunOutcome};
pub use storage::RecordStore;
pub use types::{Article, RawRecord, RawTimestamp};

pub mod prelude {
    pub use crate::clean::TextCleaner;
    pub use crate::{Article, DashboardConfig, Error, RawRecord, RawTimestamp, RecordStore, Result, Topic};
}
