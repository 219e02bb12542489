//! The error manager service

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::{ErrorsConfig, RuntimeConfig};

use super::console::{ConsoleLine, ConsoleSink, Level, Style, TracingSink};
use super::dump;
use super::record::{ContextValue, ErrorId, ErrorRecord, Failure, NativeFailure};
use super::viewer::{self, DiagnosticsViewer, StdoutViewer};

/// Title given to failures that reach [`ErrorManager::unhandled`]
pub const UNHANDLED_TITLE: &str = "Unhandled Error";

/// Title for recovered failures that carry no name of their own
pub const DEFAULT_TITLE: &str = "Error";

/// Identifier of the current session, embedded in dump headers
///
/// A shared handle: clones see updates made through [`SessionId::set`], and
/// the manager reads the current value each time it renders a dump.
#[derive(Debug, Clone)]
pub struct SessionId(Rc<RefCell<String>>);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(id.into())))
    }

    pub fn current(&self) -> String {
        self.0.borrow().clone()
    }

    /// Replace the identifier, e.g. once the page data has arrived
    pub fn set(&self, id: impl Into<String>) {
        *self.0.borrow_mut() = id.into();
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.borrow())
    }
}

/// Collects failures into an append-only log and prints them
///
/// One manager is created by the application and shared (typically behind an
/// `Rc`) with every module that reports failures. Entries are never removed
/// or reordered.
pub struct ErrorManager {
    log: RefCell<Vec<ErrorRecord>>,
    session: SessionId,
    config: ErrorsConfig,
    sink: Box<dyn ConsoleSink>,
    viewer: Box<dyn DiagnosticsViewer>,
}

impl fmt::Debug for ErrorManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorManager")
            .field("session", &self.session)
            .field("entries", &self.log.borrow().len())
            .finish_non_exhaustive()
    }
}

impl ErrorManager {
    /// Create a manager printing through `tracing` and opening dumps on stdout
    pub fn new(session: impl Into<SessionId>, config: ErrorsConfig) -> Self {
        Self {
            log: RefCell::new(Vec::new()),
            session: session.into(),
            config,
            sink: Box::new(TracingSink),
            viewer: Box::new(StdoutViewer),
        }
    }

    /// Create a manager for the configured session
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.session.data_id.as_str(), config.errors.clone())
    }

    pub fn with_sink(mut self, sink: impl ConsoleSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_viewer(mut self, viewer: impl DiagnosticsViewer + 'static) -> Self {
        self.viewer = Box::new(viewer);
        self
    }

    /// Handle to the session identifier shown in dump headers
    pub fn session(&self) -> SessionId {
        self.session.clone()
    }

    /// Build a record and fail with it; nothing is logged until it is reported
    pub fn raise<T>(&self, message: impl Into<String>, id: impl Into<ErrorId>) -> Result<T, ErrorRecord> {
        Err(ErrorRecord::new(message, id))
    }

    /// Log a record, or route a raw failure through [`unhandled`](Self::unhandled)
    pub fn report(&self, failure: impl Into<Failure>) {
        match failure.into() {
            Failure::Record(record) => self.commit(record),
            Failure::Native(native) => self.unhandled(native),
        }
    }

    /// Record an already-caught failure without propagating it
    pub fn silent(&self, failure: impl Into<Failure>, message: &str, context: Vec<ContextValue>) {
        let mut context = context;
        let (message, title) = match failure.into() {
            Failure::Record(record) => (
                format!("{}; {}", record.message(), message),
                record.id().clone(),
            ),
            Failure::Native(native) => match native.name.clone() {
                Some(name) => {
                    context.insert(0, ContextValue::Failure(native));
                    (message.to_string(), ErrorId::Named(name))
                }
                None => (message.to_string(), ErrorId::named(DEFAULT_TITLE)),
            },
        };

        self.commit(ErrorRecord::new(message, title).with_context(context));
    }

    /// Print a warning; warnings never enter the log
    pub fn warn(&self, message: impl Into<String>, id: impl Into<ErrorId>) {
        let record = ErrorRecord::new(message, id);
        self.sink.emit(&headline(Level::Warn, &record));
    }

    /// Report a raw failure under the fixed "Unhandled Error" title
    pub fn unhandled(&self, failure: NativeFailure) {
        let mut context = Vec::with_capacity(2);
        let trace = failure.stack.clone();
        let message = failure.message.clone();
        context.push(ContextValue::Failure(failure));
        if let Some(trace) = trace {
            context.push(ContextValue::Trace(trace));
        }

        self.commit(ErrorRecord::new(message, UNHANDLED_TITLE).with_context(context));
    }

    fn commit(&self, record: ErrorRecord) {
        let line = headline(Level::Error, &record);
        self.log.borrow_mut().push(record);
        self.sink.emit(&line);
        self.sink.emit(&self.instructions());
    }

    fn instructions(&self) -> ConsoleLine {
        ConsoleLine::new(Level::Info)
            .with("You can report this error at ", Style::PLAIN)
            .with(self.config.report_url.as_str(), Style::PLAIN)
            .with(" and get a dump of what happened by running `", Style::PLAIN)
            .with(self.config.dump_hint.as_str(), Style::PLAIN.monospace())
            .with("`", Style::PLAIN)
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Snapshot of the log in insertion order
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.log.borrow().clone()
    }

    /// The whole log as numbered plain text
    pub fn dump(&self) -> String {
        dump::render_plain(&self.session.current(), &self.log.borrow())
    }

    /// Open the plain-text dump on the viewer; returns the opened URL
    pub fn dump_text(&self) -> String {
        let url = viewer::data_url(&self.dump());
        self.viewer.open(&url);
        url
    }

    /// Print the dump to the console sink with styling
    pub fn dump_console(&self) {
        let line = dump::render_console(&self.session.current(), &self.log.borrow());
        self.sink.emit(&line);
    }
}

/// `id: message` with the id emphasized, followed by any context values
fn headline(level: Level, record: &ErrorRecord) -> ConsoleLine {
    let mut line = ConsoleLine::new(level)
        .with(format!("{}:", record.id_string()), Style::PLAIN.bold())
        .with(format!(" {}", record.message()), Style::PLAIN);
    for value in record.context() {
        line.push(format!(" {}", value), Style::PLAIN);
    }
    line
}
