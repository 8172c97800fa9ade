//! Patient intake: a terminal client that walks clinicians through
//! multi-step intake forms, and a maintenance service that prunes
//! redundant question definitions.

pub mod app;
pub mod config;
pub mod intake;
pub mod maintenance;
pub mod platform;
pub mod state;
pub mod ui;
