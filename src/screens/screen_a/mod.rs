mod controller;
mod intent;
mod reducer;
mod state;

pub use controller::ScreenAController;
pub use intent::ScreenAIntent;
pub use reducer::ScreenAReducer;
pub use state::ScreenAState;
