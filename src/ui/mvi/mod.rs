//! Model-View-Intent (MVI) primitives for screen controllers.
//!
//! ```text
//! Key press ──→ Intent ──→ Reducer ──→ State ──→ View
//!                  │
//!                  └──→ navigation callback (side effect, owned by the controller)
//! ```
//!
//! - **State**: value the view renders from
//! - **Intent**: user actions on a screen
//! - **Reducer**: pure function `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
