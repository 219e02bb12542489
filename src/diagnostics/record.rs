//! Normalized error records and the failures they are built from

use std::error::Error as StdError;
use std::fmt;

/// A unique, label-carrying error tag
///
/// Prints as `Symbol(label)`; used as an [`ErrorId`] it renders as the bare label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorSymbol {
    label: String,
}

impl ErrorSymbol {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for ErrorSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.label)
    }
}

/// Display identifier of an error record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorId {
    Named(String),
    Symbolic { label: String },
}

impl ErrorId {
    pub fn named(value: impl Into<String>) -> Self {
        ErrorId::Named(value.into())
    }

    pub fn symbolic(label: impl Into<String>) -> Self {
        ErrorId::Symbolic {
            label: label.into(),
        }
    }

    /// Recover a symbolic id from its printed `Symbol(label)` form
    pub fn from_symbol_repr(repr: &str) -> Option<Self> {
        repr.strip_prefix("Symbol(")
            .and_then(|rest| rest.strip_suffix(')'))
            .map(ErrorId::symbolic)
    }

    /// The printable id: the value for named ids, the bare label for symbolic ones
    pub fn as_str(&self) -> &str {
        match self {
            ErrorId::Named(value) => value,
            ErrorId::Symbolic { label } => label,
        }
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorId {
    fn from(value: &str) -> Self {
        ErrorId::named(value)
    }
}

impl From<String> for ErrorId {
    fn from(value: String) -> Self {
        ErrorId::Named(value)
    }
}

impl From<ErrorSymbol> for ErrorId {
    fn from(symbol: ErrorSymbol) -> Self {
        ErrorId::Symbolic {
            label: symbol.label,
        }
    }
}

impl From<&ErrorSymbol> for ErrorId {
    fn from(symbol: &ErrorSymbol) -> Self {
        ErrorId::symbolic(symbol.label.clone())
    }
}

/// A raw failure that has not been normalized into an [`ErrorRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFailure {
    pub name: Option<String>,
    pub message: String,
    pub stack: Option<String>,
}

impl NativeFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: None,
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture an error's message; its source chain becomes the trace
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(format!("caused by: {}", cause));
            source = cause.source();
        }

        Self {
            name: None,
            message: error.to_string(),
            stack: (!chain.is_empty()).then(|| chain.join("\n")),
        }
    }
}

impl fmt::Display for NativeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: {}", name, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Auxiliary value attached to an error record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Text(String),
    Failure(NativeFailure),
    Trace(String),
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Text(text) => f.write_str(text),
            ContextValue::Failure(failure) => write!(f, "{}", failure),
            ContextValue::Trace(trace) => write!(f, "trace: {}", trace),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(text: &str) -> Self {
        ContextValue::Text(text.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(text: String) -> Self {
        ContextValue::Text(text)
    }
}

impl From<NativeFailure> for ContextValue {
    fn from(failure: NativeFailure) -> Self {
        ContextValue::Failure(failure)
    }
}

/// An immutable, normalized failure: message, id and auxiliary context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    message: String,
    id: ErrorId,
    context: Vec<ContextValue>,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>, id: impl Into<ErrorId>) -> Self {
        Self {
            message: message.into(),
            id: id.into(),
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Vec<ContextValue>) -> Self {
        self.context = context;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn id(&self) -> &ErrorId {
        &self.id
    }

    pub fn id_string(&self) -> &str {
        self.id.as_str()
    }

    pub fn context(&self) -> &[ContextValue] {
        &self.context
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.message)
    }
}

impl StdError for ErrorRecord {}

/// Input accepted by the reporting paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Record(ErrorRecord),
    Native(NativeFailure),
}

impl From<ErrorRecord> for Failure {
    fn from(record: ErrorRecord) -> Self {
        Failure::Record(record)
    }
}

impl From<NativeFailure> for Failure {
    fn from(failure: NativeFailure) -> Self {
        Failure::Native(failure)
    }
}
