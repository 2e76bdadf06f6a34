//! Theme engine and template rendering.
//!
//! Converts block render trees to HTML, through Tera templates when the
//! theme provides them and inline markup otherwise.

mod engine;
mod render;

pub use engine::ThemeEngine;
pub use render::{RenderTreeConsumer, html_escape};
