//! Centralized error reporting
//!
//! Failures are normalized into [`ErrorRecord`]s. Reported, silent and
//! unhandled failures are appended to a durable, append-only log and printed;
//! warnings are printed only. The log can be dumped as plain text or as
//! styled console output.
//!
//! # Example
//!
//! ```rust
//! use viewcore::config::ErrorsConfig;
//! use viewcore::diagnostics::{ErrorManager, MemorySink, NativeFailure};
//!
//! let errors = ErrorManager::new("session-42", ErrorsConfig::default())
//!     .with_sink(MemorySink::new());
//!
//! errors.silent(NativeFailure::new("bad").with_name("TypeError"), "bad input", vec![]);
//! errors.warn("slow network", "NetWarning");
//!
//! assert_eq!(errors.len(), 1);
//! assert!(errors.dump().contains(" 1. TypeError\n    bad input"));
//! ```

mod console;
mod dump;
mod manager;
mod record;
mod viewer;

pub use console::{
    ConsoleLine, ConsoleSink, Level, MemorySink, Segment, Style, TerminalSink, Tint, TracingSink,
};
pub use dump::{render_console, render_plain};
pub use manager::{ErrorManager, SessionId, DEFAULT_TITLE, UNHANDLED_TITLE};
pub use record::{ContextValue, ErrorId, ErrorRecord, ErrorSymbol, Failure, NativeFailure};
pub use viewer::{data_url, DiagnosticsViewer, MemoryViewer, StdoutViewer};
