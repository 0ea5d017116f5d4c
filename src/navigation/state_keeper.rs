//! Save/restore of component state.
//!
//! Components register suppliers under a key. On save every supplier is
//! invoked and the results are collected into a [`SavedState`]. On the next
//! start the host hands that `SavedState` back and each component consumes
//! its own key during construction.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while encoding or decoding saved state.
#[derive(Debug, Error)]
pub enum StateKeeperError {
    #[error("Failed to encode state for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode state for key '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Serialized state tree, keyed by supplier key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedState {
    entries: BTreeMap<String, serde_json::Value>,
}

impl SavedState {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }
}

type Supplier = Box<dyn Fn() -> Result<serde_json::Value, StateKeeperError>>;

struct KeeperInner {
    restored: HashMap<String, serde_json::Value>,
    suppliers: BTreeMap<String, Supplier>,
}

/// Shared state keeper handle.
#[derive(Clone)]
pub struct StateKeeper {
    inner: Rc<RefCell<KeeperInner>>,
}

impl Default for StateKeeper {
    fn default() -> Self {
        Self::new(None)
    }
}

impl StateKeeper {
    pub fn new(restored: Option<SavedState>) -> Self {
        let restored = restored
            .map(|state| state.entries.into_iter().collect())
            .unwrap_or_default();
        Self {
            inner: Rc::new(RefCell::new(KeeperInner {
                restored,
                suppliers: BTreeMap::new(),
            })),
        }
    }

    /// Take the restored value for `key`. A second call returns `None`.
    pub fn consume<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StateKeeperError> {
        let Some(raw) = self.inner.borrow_mut().restored.remove(key) else {
            return Ok(None);
        };
        serde_json::from_value(raw)
            .map(Some)
            .map_err(|source| StateKeeperError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Register a supplier for `key`, replacing any previous one.
    pub fn register<T, F>(&self, key: &str, produce: F)
    where
        T: Serialize,
        F: Fn() -> T + 'static,
    {
        let owned_key = key.to_string();
        let supplier: Supplier = Box::new(move || {
            serde_json::to_value(produce()).map_err(|source| StateKeeperError::Encode {
                key: owned_key.clone(),
                source,
            })
        });
        let replaced = self
            .inner
            .borrow_mut()
            .suppliers
            .insert(key.to_string(), supplier);
        if replaced.is_some() {
            tracing::warn!(key, "state supplier replaced");
        }
    }

    pub fn unregister(&self, key: &str) {
        self.inner.borrow_mut().suppliers.remove(key);
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.inner.borrow().suppliers.contains_key(key)
    }

    /// Nested keeper saved under `key` of this one.
    ///
    /// The child consumes its restored state from this keeper's restored
    /// value at `key`, and its own save output is registered back under the
    /// same key. Call [`StateKeeper::unregister`] with `key` to drop it.
    pub fn child(&self, key: &str) -> StateKeeper {
        let restored = match self.consume::<SavedState>(key) {
            Ok(restored) => restored,
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding nested saved state");
                None
            }
        };
        let child = StateKeeper::new(restored);
        let nested = Rc::downgrade(&child.inner);
        let owned_key = key.to_string();
        let supplier: Supplier = Box::new(move || {
            let saved = match nested.upgrade() {
                Some(inner) => StateKeeper { inner }.save()?,
                None => SavedState::default(),
            };
            serde_json::to_value(saved).map_err(|source| StateKeeperError::Encode {
                key: owned_key.clone(),
                source,
            })
        });
        self.inner
            .borrow_mut()
            .suppliers
            .insert(key.to_string(), supplier);
        child
    }

    /// Invoke every supplier and collect the results.
    pub fn save(&self) -> Result<SavedState, StateKeeperError> {
        let inner = self.inner.borrow();
        let mut entries = BTreeMap::new();
        for (key, supplier) in &inner.suppliers {
            entries.insert(key.clone(), supplier()?);
        }
        Ok(SavedState { entries })
    }
}

impl std::fmt::Debug for StateKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("StateKeeper")
            .field("suppliers", &inner.suppliers.keys().collect::<Vec<_>>())
            .field("pending_restore", &inner.restored.len())
            .finish()
    }
}
