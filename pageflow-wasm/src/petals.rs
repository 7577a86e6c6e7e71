use pageflow_core::{PetalConfig, RandomSource, Selectors, generate_petals, stylesheet};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::utils::{debug, viewport_width};

/// `Math.random` as a petal random source.
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Appends one `div.petal` per descriptor to the container and injects all
/// keyframe rules as a single `<style>` element. No container, no petals.
pub fn mount_petals(
    window: &Window,
    document: &Document,
    cfg: &PetalConfig,
    selectors: &Selectors,
) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(&selectors.petal_container_id) else {
        debug(&format!(
            "#{} not found; skipping petals",
            selectors.petal_container_id
        ));
        return Ok(());
    };

    let petals = generate_petals(cfg, viewport_width(window), &mut JsRandom);
    for p in &petals {
        let el = document.create_element("div")?;
        el.set_class_name(&selectors.petal_class);
        el.set_attribute("style", &p.inline_style())?;
        container.append_child(&el)?;
    }

    let style = document.create_element("style")?;
    style.set_text_content(Some(&stylesheet(&petals)));
    let head = document.head().ok_or("document has no <head>")?;
    head.append_child(&style)?;
    debug(&format!("mounted {} petals", petals.len()));
    Ok(())
}
