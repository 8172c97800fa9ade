//! Form rendering module
//!
//! - `field_renderer`: text and score field widgets
//! - `step_form`: the current step of an open form with its actions

mod field_renderer;
mod step_form;

pub use field_renderer::{draw_field, field_height, score_scale_line};
pub use step_form::draw as draw_form_fill;
