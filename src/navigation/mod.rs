//! Navigation core: observable values, component contexts and the typed
//! child stack.
//!
//! ```text
//! Screen controller ──callback──→ StackNavigation ──command──→ ChildStackController
//!        ↑                                                          │
//!        └──────────── factory (C, ComponentContext) → T ───────────┤
//!                                                                   ↓
//!                                         Value<ChildStack<C, T>> ──→ View
//! ```

mod context;
mod lifecycle;
mod stack;
mod state_keeper;
mod value;

pub use context::ComponentContext;
pub use lifecycle::{Lifecycle, LifecycleState};
pub use stack::{Child, ChildStack, ChildStackController, NavCommand, StackNavigation};
pub use state_keeper::{SavedState, StateKeeper, StateKeeperError};
pub use value::{MutableValue, Subscription, Value};
