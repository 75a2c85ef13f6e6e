//! Request logging infrastructure
//!
//! Provides structured logging with:
//! - Trace IDs for request correlation
//! - One entry line and one exit line per request

mod trace_context;

pub use trace_context::{generate_trace_id, RequestSpan, TraceContext};
