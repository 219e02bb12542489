//! Display surfaces for plain-text dumps

use std::cell::RefCell;
use std::rc::Rc;

/// Opens a URL on a new display surface
pub trait DiagnosticsViewer {
    fn open(&self, url: &str);
}

/// `data:` URL carrying `text` as percent-encoded plain text
pub fn data_url(text: &str) -> String {
    format!("data:text/plain,{}", urlencoding::encode(text))
}

/// Prints the URL to stdout for the user to open
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutViewer;

impl DiagnosticsViewer for StdoutViewer {
    fn open(&self, url: &str) {
        println!("{}", url);
    }
}

/// Remembers every opened URL; clones share the same list
#[derive(Debug, Clone, Default)]
pub struct MemoryViewer {
    opened: Rc<RefCell<Vec<String>>>,
}

impl MemoryViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl DiagnosticsViewer for MemoryViewer {
    fn open(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}
