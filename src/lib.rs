//! Two-screen terminal app built around a typed, restorable navigation
//! stack.
//!
//! The navigation core lives in [`navigation`] and is independent of the
//! terminal. [`screens`] defines the destinations and their controllers.
//! [`ui`] renders whatever is on top of the stack.

pub mod config;
pub mod logging;
pub mod navigation;
pub mod persistence;
pub mod screens;
pub mod ui;
