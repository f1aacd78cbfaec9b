//! Tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/zadmin/zadmin-otlp.json`, one OTLP
//! JSON document per exported batch. The file rotates at 10 MB and keeps three
//! backups.
//!
//! The filter comes from the `trace_level` plugin option and accepts any
//! `EnvFilter` directive (`"debug"`, `"zadmin=trace"`, ...). It defaults to
//! `"info"`.
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and OTLP JSON encoding
//! - [`file_writer`]: Size-rotated line writer

mod exporter;
mod file_writer;
mod init;

pub use init::{init_tracing, TRACE_FILE_NAME};
