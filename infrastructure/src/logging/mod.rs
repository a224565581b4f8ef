//! Logging infrastructure — structured resolution logging.
//!
//! Provides [`JsonlResolutionLogger`], a JSONL file writer that implements
//! the [`ResolutionLogger`](alias_application::ResolutionLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlResolutionLogger;
