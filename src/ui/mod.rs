//! Terminal view layer: renders the top of the screen stack and animates
//! changes between screens.

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod transition;
pub mod views;
