use crate::navigation::lifecycle::Lifecycle;
use crate::navigation::state_keeper::{SavedState, StateKeeper};

/// Scoping handle passed to every controller at construction.
///
/// Controllers hold their context explicitly and use it to observe their
/// lifecycle and to save/restore state. Child contexts are destroyed with
/// their parent.
#[derive(Clone, Debug)]
pub struct ComponentContext {
    key: String,
    lifecycle: Lifecycle,
    state_keeper: StateKeeper,
}

impl ComponentContext {
    /// Root context for the application, optionally seeded with state saved by
    /// a previous run.
    pub fn root(restored: Option<SavedState>) -> Self {
        Self {
            key: "root".to_string(),
            lifecycle: Lifecycle::new("root"),
            state_keeper: StateKeeper::new(restored),
        }
    }

    pub fn child(&self, key: &str) -> Self {
        let path = format!("{}/{}", self.key, key);
        Self {
            lifecycle: self.lifecycle.child(path.clone()),
            state_keeper: self.state_keeper.child(key),
            key: path,
        }
    }

    /// Slash-separated path from the root context.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn state_keeper(&self) -> &StateKeeper {
        &self.state_keeper
    }
}
