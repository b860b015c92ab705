//! # RCP Common Library
//!
//! Shared code for the recipe pipeline steps (rcp-vd, rcp-an) including:
//! - Error type and result alias
//! - Configuration loading and data directory resolution
//! - Tracing initialization
//! - Flat record model for the four exported tables
//! - Numeric coercion shared by validation and analytics
//! - Record Source (CSV and JSON readers)

pub mod config;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod record;
pub mod source;

pub use error::{Error, Result};
pub use record::{Record, RecordSet, Table};
pub use source::DataFormat;
