//! Outreach to students who have not yet connected with their teacher.
//!
//! The pipeline authenticates against the class backend, lists the
//! teacher's classes, keeps the ones matching a course keyword, grade and
//! start date, pulls each class roster and returns the students that are not
//! yet contacts. A separate call broadcasts a message to a chosen subset.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use class_gateway::{GatewayClient, GatewayConfig};
//! use outreach::{MemoryConfigStore, OutreachPipeline, PipelineConfig};
//!
//! # async fn example() -> Result<(), outreach::OutreachError> {
//! let client = GatewayClient::new(GatewayConfig::default()).map_err(outreach::OutreachError::Upstream)?;
//! let pipeline = OutreachPipeline::new(
//!     client,
//!     PipelineConfig::default(),
//!     Arc::new(MemoryConfigStore::new()),
//! );
//!
//! let candidates = pipeline
//!     .discover_candidates("teacher-1", &["一年级"], &["周六"])
//!     .await?;
//!
//! let sent = pipeline
//!     .dispatch("teacher-1", "请添加老师好友", candidates.students)
//!     .await?;
//! println!("sent to {sent} students");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dates;
pub mod dedup;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod roster;
pub mod store;

pub use config::PipelineConfig;
pub use error::{ConfigDecodeError, ConfigError, OutreachError, Result, ValidationError};
pub use models::{
    Candidates, ClassRecord, DiscoveryReport, DispatchRequest, FilterCriteria, StudentRecord,
    TargetClass,
};
pub use pipeline::OutreachPipeline;
pub use store::{ConfigResolver, MemoryConfigStore};

pub use database::ParamScope;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
