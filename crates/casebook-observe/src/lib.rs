//! Observability for Casebook: tracing subscriber setup with optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
