//! Tracing setup with optional file-based span export.
//!
//! ```text
//! tracing macros ─┬─▶ fmt layer ─▶ stderr
//!                 └─▶ tracing-opentelemetry ─▶ FileSpanExporter ─▶ recluta-spans.jsonl
//! ```
//!
//! # Configuration
//!
//! Level is taken from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! Span export is enabled with `trace_file = true`. The file lives in the data
//! directory, rotates at 10 MiB and keeps 3 backups.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: Span to JSON conversion
//! - `file_writer`: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SPAN_FILE_NAME};
