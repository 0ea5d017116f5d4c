//! Base trait for screen intents.

/// Marker trait for intent objects.
///
/// Intents cover both local edits (reduced into new state) and requests
/// that the owning controller turns into navigation callbacks.
pub trait Intent: 'static {}
