//! Application state module

mod app_state;
pub mod catalog;
mod forms;

pub use app_state::*;
pub use forms::*;
