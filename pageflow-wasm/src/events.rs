use std::cell::RefCell;
use std::rc::Rc;

use pageflow_core::Intent;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, KeyboardEvent, TouchEvent, WheelEvent};

use crate::slides::run_plan;
use crate::state::State;
use crate::utils::debug;

fn dispatch(state: &Rc<RefCell<State>>, intent: Intent) {
    let plan = state.borrow_mut().navigator.dispatch(intent);
    run_plan(state, plan);
}

/// Index of the slide containing `el`, if any.
fn containing_slide(state: &State, el: &Element) -> Option<usize> {
    let slide = el.closest(&state.selectors.slide).ok()??;
    let slide: &JsValue = slide.as_ref();
    state
        .slides
        .iter()
        .position(|s| AsRef::<JsValue>::as_ref(s) == slide)
}

/// Wires wheel, touch, keyboard and button input to the navigator.
pub fn attach_input(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (window, document) = {
        let s = state.borrow();
        (s.window.clone(), s.document.clone())
    };

    // Wheel: must be non-passive so the page itself never scrolls
    {
        let st = state.clone();
        let onwheel = Closure::<dyn FnMut(WheelEvent)>::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            let intent = {
                let s = st.borrow();
                s.router.on_wheel(e.delta_y(), s.navigator.is_busy())
            };
            if let Some(intent) = intent {
                dispatch(&st, intent);
            }
        }));
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            onwheel.as_ref().unchecked_ref(),
            &opts,
        )?;
        onwheel.forget();
    }

    // Touch swipe
    {
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);

        let st = state.clone();
        let ontouchstart = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            if let Some(t) = e.touches().get(0) {
                st.borrow_mut().router.on_touch_start(t.client_y() as f64);
            }
        }));
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            ontouchstart.as_ref().unchecked_ref(),
            &opts,
        )?;
        ontouchstart.forget();

        let st = state.clone();
        let ontouchend = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            let Some(t) = e.changed_touches().get(0) else {
                return;
            };
            let intent = st.borrow_mut().router.on_touch_end(t.client_y() as f64);
            if let Some(intent) = intent {
                dispatch(&st, intent);
            }
        }));
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "touchend",
            ontouchend.as_ref().unchecked_ref(),
            &opts,
        )?;
        ontouchend.forget();
    }

    // Keyboard
    {
        let st = state.clone();
        let keydown =
            Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
                let intent = st.borrow().router.on_key(&e.key());
                if let Some(intent) = intent {
                    e.prevent_default();
                    dispatch(&st, intent);
                }
            }));
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // "Next" cues inside each slide
    let selectors = state.borrow().selectors.clone();
    let cues = document.query_selector_all(&selectors.next_control)?;
    for i in 0..cues.length() {
        let Some(cue) = cues.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let st = state.clone();
        let el = cue.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let slide = containing_slide(&st.borrow(), &el);
            if let Some(i) = slide {
                dispatch(&st, Intent::NextFrom(i));
            }
        }));
        cue.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    // Return to the first slide
    match document.query_selector(&selectors.top_control)? {
        Some(btn) => {
            let st = state.clone();
            let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                dispatch(&st, Intent::ReturnToTop);
            }));
            btn.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();
        }
        None => debug(&format!("{} not found", selectors.top_control)),
    }

    Ok(())
}
