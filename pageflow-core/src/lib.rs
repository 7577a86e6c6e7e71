//! Host-independent logic for the petal backdrop and the full-page slide
//! navigator. The wasm crate owns the DOM; everything here is plain data.

pub mod config;
pub mod input;
pub mod navigator;
pub mod petals;
pub mod plan;

pub use config::{ConfigError, NavConfig, PageConfig, PetalConfig, Selectors};
pub use input::{Direction, InputRouter, Intent};
pub use navigator::{NavError, NavigationState, Navigator, Slide};
pub use petals::{PetalDescriptor, RandomSource, generate_petals, petal_count, stylesheet};
pub use plan::{Delay, Effect, Offset, Plan, Scheduled, Timer};
