//! OpenTelemetry span export to a local JSON-lines file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → JsonLinesExporter → rotating file
//! ```
//!
//! The file lives at `<data dir>/castview-spans.jsonl` (see
//! [`crate::infrastructure::get_data_dir`]) and rotates at 10 MB, keeping
//! three backups.
//!
//! # Usage
//!
//! ```rust,no_run
//! use castview::observability::init_tracing;
//! use castview::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing is now active");
//! ```

mod exporter;
mod file_writer;
mod init;

pub use init::{init_tracing, TRACE_FILE};
