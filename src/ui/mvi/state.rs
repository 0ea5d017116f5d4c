//! Base trait for screen state.

/// Marker trait for screen state objects.
///
/// States live in a `MutableValue` and are cloned into every observer.
pub trait UiState: Clone + PartialEq + Default + 'static {}
