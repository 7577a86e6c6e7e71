use pageflow_core::{InputRouter, Navigator, Selectors};
use web_sys::{Document, HtmlElement, Window};

/// Navigator runtime state, shared across the WASM callbacks behind an
/// `Rc<RefCell<_>>`; the listener closures keep it alive.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub selectors: Selectors,
    /// Slide elements in document order; index matches the navigator.
    pub slides: Vec<HtmlElement>,
    pub navigator: Navigator,
    pub router: InputRouter,
}

