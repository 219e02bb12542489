//! Console output: styled lines and the sinks that print them

use std::cell::RefCell;
use std::rc::Rc;

use ariadne::{Color, Fmt};

/// Severity of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Red,
    Yellow,
    Cyan,
}

impl Tint {
    fn css(self) -> &'static str {
        match self {
            Tint::Red => "red",
            Tint::Yellow => "goldenrod",
            Tint::Cyan => "darkcyan",
        }
    }

    fn terminal(self) -> Color {
        match self {
            Tint::Red => Color::Red,
            Tint::Yellow => Color::Yellow,
            Tint::Cyan => Color::Cyan,
        }
    }
}

/// Inline presentation of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub bold: bool,
    pub underline: bool,
    pub monospace: bool,
    pub color: Option<Tint>,
    /// Font size in pixels; only meaningful to CSS-capable consoles
    pub font_size: Option<u8>,
}

impl Style {
    pub const PLAIN: Style = Style {
        bold: false,
        underline: false,
        monospace: false,
        color: None,
        font_size: None,
    };

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn monospace(mut self) -> Self {
        self.monospace = true;
        self
    }

    pub fn color(mut self, tint: Tint) -> Self {
        self.color = Some(tint);
        self
    }

    pub fn size(mut self, px: u8) -> Self {
        self.font_size = Some(px);
        self
    }

    /// The style as a browser console CSS declaration list
    pub fn css(&self) -> String {
        let mut decls = Vec::new();
        if let Some(px) = self.font_size {
            decls.push(format!("font-size: {}px;", px));
        }
        if let Some(tint) = self.color {
            decls.push(format!("color: {};", tint.css()));
        }
        if self.bold {
            decls.push("font-weight: bold;".to_string());
        }
        if self.underline {
            decls.push("text-decoration: underline;".to_string());
        }
        if self.monospace {
            decls.push("font-family: Menlo, \"Fira Mono\", monospace;".to_string());
        }
        decls.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// One console entry made of styled segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub level: Level,
    pub segments: Vec<Segment>,
}

impl ConsoleLine {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            segments: Vec::new(),
        }
    }

    pub fn with(mut self, text: impl Into<String>, style: Style) -> Self {
        self.push(text, style);
        self
    }

    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        self.segments.push(Segment {
            text: text.into(),
            style,
        });
    }

    /// The line's text with all styling dropped
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Destination for console lines
pub trait ConsoleSink {
    fn emit(&self, line: &ConsoleLine);
}

impl<S: ConsoleSink + ?Sized> ConsoleSink for Rc<S> {
    fn emit(&self, line: &ConsoleLine) {
        (**self).emit(line)
    }
}

/// Forwards plain text to `tracing` at the line's level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ConsoleSink for TracingSink {
    fn emit(&self, line: &ConsoleLine) {
        let text = line.plain_text();
        match line.level {
            Level::Error => tracing::error!(target: "viewcore::errors", "{}", text),
            Level::Warn => tracing::warn!(target: "viewcore::errors", "{}", text),
            Level::Info => tracing::info!(target: "viewcore::errors", "{}", text),
        }
    }
}

/// Writes colored lines to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl TerminalSink {
    /// Render a line with terminal colors; other style attributes are dropped
    pub fn render(line: &ConsoleLine) -> String {
        line.segments
            .iter()
            .map(|seg| match seg.style.color {
                Some(tint) => seg.text.as_str().fg(tint.terminal()).to_string(),
                None => seg.text.clone(),
            })
            .collect()
    }
}

impl ConsoleSink for TerminalSink {
    fn emit(&self, line: &ConsoleLine) {
        eprintln!("{}", Self::render(line));
    }
}

/// Keeps every emitted line; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<ConsoleLine>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<ConsoleLine> {
        self.lines.borrow().clone()
    }

    pub fn plain_lines(&self) -> Vec<(Level, String)> {
        self.lines
            .borrow()
            .iter()
            .map(|line| (line.level, line.plain_text()))
            .collect()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl ConsoleSink for MemorySink {
    fn emit(&self, line: &ConsoleLine) {
        self.lines.borrow_mut().push(line.clone());
    }
}
