use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use pageflow_core::{Delay, Effect, Plan};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, Window};

use crate::state::State;
use crate::utils::log;

fn slide_el(state: &State, i: usize) -> Result<&HtmlElement, JsValue> {
    state
        .slides
        .get(i)
        .ok_or_else(|| JsValue::from_str(&format!("no slide element {i}")))
}

/// Writes a single navigator effect onto the slide elements.
fn apply_effect(state: &State, effect: &Effect) -> Result<(), JsValue> {
    let slide = |i: usize| slide_el(state, i);
    match effect {
        Effect::SetOffset { slide: i, offset } => {
            let style = slide(*i)?.style();
            match offset.transform() {
                Some(t) => style.set_property("transform", t)?,
                None => {
                    style.remove_property("transform")?;
                }
            }
        }
        Effect::SetTransition { slide: i, value } => {
            let style = slide(*i)?.style();
            match value {
                Some(v) => style.set_property("transition", v)?,
                None => {
                    style.remove_property("transition")?;
                }
            }
        }
        Effect::MarkVisible { slide: i } => {
            slide(*i)?
                .class_list()
                .add_1(&state.selectors.visible_class)?;
        }
        Effect::RevealTitle { slide: i } => {
            if let Some(title) = slide(*i)?.query_selector(&state.selectors.title)? {
                title
                    .class_list()
                    .add_1(&state.selectors.title_reveal_class)?;
            }
        }
    }
    Ok(())
}

/// Applies a plan's effects now and arms its timers. Each elapsed timer is fed
/// back into the navigator and the resulting plan applied in turn.
pub fn run_plan(state: &Rc<RefCell<State>>, plan: Plan) {
    if plan.is_empty() {
        return;
    }
    let window = {
        let s = state.borrow();
        for effect in &plan.effects {
            if let Err(e) = apply_effect(&s, effect) {
                log(&format!("Failed to apply {effect:?}: {e:?}"));
            }
        }
        s.window.clone()
    };
    for scheduled in plan.timers {
        let st = state.clone();
        let window = window.clone();
        wasm_bindgen_futures::spawn_local(async move {
            // a lost timer could strand `busy`; fire it anyway, just early
            if let Err(e) = wait(&window, scheduled.delay).await {
                log(&format!("Timer {:?} failed, firing now: {e:?}", scheduled.timer));
            }
            let next = st.borrow_mut().navigator.fire(scheduled.timer);
            run_plan(&st, next);
        });
    }
}

/// `setTimeout` takes an `i32`; larger delays saturate instead of wrapping.
fn timeout_arg(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Resolves after `delay`: a `setTimeout` for millis, successive
/// `requestAnimationFrame` callbacks for frames.
async fn wait(window: &Window, delay: Delay) -> Result<(), JsValue> {
    match delay {
        Delay::Millis(ms) => {
            let mut result = Ok(());
            let promise = Promise::new(&mut |resolve, _reject| {
                result = window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_arg(ms))
                    .map(|_| ());
            });
            result?;
            JsFuture::from(promise).await?;
        }
        Delay::Frames(n) => {
            for _ in 0..n {
                let mut result = Ok(());
                let promise = Promise::new(&mut |resolve, _reject| {
                    result = window.request_animation_frame(&resolve).map(|_| ());
                });
                result?;
                JsFuture::from(promise).await?;
            }
        }
    }
    Ok(())
}
