use std::cell::RefCell;
use std::rc::Rc;

use pageflow_core::{InputRouter, Navigator, PageConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

mod constants;
mod events;
mod petals;
mod slides;
mod state;
mod utils;

use crate::state::State;
use crate::utils::{debug, load_config, log};

fn collect_slides(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// Builds the navigator for the page's slides, paints the first slide and
/// attaches input. A page without slides is left alone.
fn init_navigation(window: Window, document: Document, cfg: &PageConfig) -> Result<(), JsValue> {
    let slides = collect_slides(&document, &cfg.selectors.slide)?;
    let Some(navigator) = Navigator::new(slides.len(), cfg.navigation.clone()) else {
        debug(&format!("no {} elements; navigation disabled", cfg.selectors.slide));
        return Ok(());
    };

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        selectors: cfg.selectors.clone(),
        slides,
        router: InputRouter::new(&cfg.navigation),
        navigator,
    }));

    let plan = state.borrow_mut().navigator.start();
    slides::run_plan(&state, plan);
    events::attach_input(state)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let cfg = load_config(&document);

    // The two subsystems are independent: a failure in one must not stop
    // the other.
    if let Err(e) = petals::mount_petals(&window, &document, &cfg.petals, &cfg.selectors) {
        log(&format!("Petals unavailable: {e:?}"));
    }
    if let Err(e) = init_navigation(window, document, &cfg) {
        log(&format!("Navigation unavailable: {e:?}"));
    }
    Ok(())
}
