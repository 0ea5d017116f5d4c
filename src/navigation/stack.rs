//! Typed navigation stack.
//!
//! [`StackNavigation`] is the command source: screen controllers hold a clone
//! and call [`StackNavigation::push`] / [`StackNavigation::pop`] from their
//! callbacks. [`ChildStackController`] owns the entries, creates one child
//! component per configuration through a factory, and publishes a
//! [`ChildStack`] snapshot after every change.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::navigation::context::ComponentContext;
use crate::navigation::value::{MutableValue, Value, WeakMutableValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand<C> {
    Push(C),
    Pop,
}

type Handler<C> = Rc<dyn Fn(NavCommand<C>)>;

struct NavInner<C> {
    queue: RefCell<VecDeque<NavCommand<C>>>,
    handler: RefCell<Option<Handler<C>>>,
    draining: Cell<bool>,
}

/// Cloneable handle used to request stack changes.
///
/// Commands are applied synchronously. A command issued while another one is
/// being applied (from a listener, a lifecycle observer or a factory) is
/// queued and applied before the outermost call returns.
pub struct StackNavigation<C> {
    inner: Rc<NavInner<C>>,
}

impl<C> Clone for StackNavigation<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: fmt::Debug + 'static> Default for StackNavigation<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: fmt::Debug + 'static> StackNavigation<C> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(NavInner {
                queue: RefCell::new(VecDeque::new()),
                handler: RefCell::new(None),
                draining: Cell::new(false),
            }),
        }
    }

    pub fn push(&self, configuration: C) {
        self.navigate(NavCommand::Push(configuration));
    }

    pub fn pop(&self) {
        self.navigate(NavCommand::Pop);
    }

    pub fn navigate(&self, command: NavCommand<C>) {
        tracing::debug!(?command, "navigate");
        self.inner.queue.borrow_mut().push_back(command);
        if self.inner.draining.replace(true) {
            return;
        }
        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(command) = next else {
                break;
            };
            let handler = self.inner.handler.borrow().clone();
            match handler {
                Some(handler) => handler(command),
                None => tracing::warn!(?command, "no stack attached, command dropped"),
            }
        }
        self.inner.draining.set(false);
    }

    fn attach(&self, handler: Handler<C>) {
        *self.inner.handler.borrow_mut() = Some(handler);
    }
}

/// One stack entry as seen by observers.
pub struct Child<C, T> {
    pub configuration: C,
    pub instance: Rc<T>,
}

impl<C: Clone, T> Clone for Child<C, T> {
    fn clone(&self) -> Self {
        Self {
            configuration: self.configuration.clone(),
            instance: Rc::clone(&self.instance),
        }
    }
}

impl<C: fmt::Debug, T: fmt::Debug> fmt::Debug for Child<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Child")
            .field("configuration", &self.configuration)
            .field("instance", &self.instance)
            .finish()
    }
}

/// Immutable snapshot of the stack. `active` is the visible entry.
pub struct ChildStack<C, T> {
    pub active: Child<C, T>,
    /// Entries below `active`, bottom first.
    pub back_stack: Vec<Child<C, T>>,
}

impl<C: Clone, T> Clone for ChildStack<C, T> {
    fn clone(&self) -> Self {
        Self {
            active: self.active.clone(),
            back_stack: self.back_stack.clone(),
        }
    }
}

impl<C: fmt::Debug, T: fmt::Debug> fmt::Debug for ChildStack<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildStack")
            .field("active", &self.active)
            .field("back_stack", &self.back_stack)
            .finish()
    }
}

impl<C: Clone, T> ChildStack<C, T> {
    /// All entries, bottom first.
    pub fn items(&self) -> impl Iterator<Item = &Child<C, T>> {
        self.back_stack.iter().chain(std::iter::once(&self.active))
    }

    pub fn len(&self) -> usize {
        self.back_stack.len() + 1
    }

    /// Never true; a stack always has an active entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn configurations(&self) -> Vec<C> {
        self.items().map(|child| child.configuration.clone()).collect()
    }

    /// True when `instance` is one of the entries below the active one.
    pub fn contains_in_back_stack(&self, instance: &Rc<T>) -> bool {
        self.back_stack
            .iter()
            .any(|child| Rc::ptr_eq(&child.instance, instance))
    }
}

struct Entry<C, T> {
    configuration: C,
    instance: Rc<T>,
    context: ComponentContext,
}

type Factory<C, T> = Box<dyn Fn(C, ComponentContext) -> T>;

struct StackCore<C, T> {
    context: ComponentContext,
    key: String,
    entries: Vec<Entry<C, T>>,
    factory: Factory<C, T>,
}

enum Effect<C, T> {
    Pushed {
        previous: Option<ComponentContext>,
        current: ComponentContext,
    },
    Popped {
        removed: Entry<C, T>,
        current: ComponentContext,
    },
    Exit,
}

impl<C, T> StackCore<C, T> {
    fn entry_key(&self, index: usize) -> String {
        format!("{}.{}", self.key, index)
    }
}

impl<C: Clone + fmt::Debug, T> StackCore<C, T> {

    fn create_entry(&self, configuration: C) -> Entry<C, T> {
        let context = self.context.child(&self.entry_key(self.entries.len()));
        let instance = Rc::new((self.factory)(configuration.clone(), context.clone()));
        Entry {
            configuration,
            instance,
            context,
        }
    }

    fn apply(&mut self, command: NavCommand<C>) -> Effect<C, T> {
        match command {
            NavCommand::Push(configuration) => {
                let previous = self.entries.last().map(|e| e.context.clone());
                let entry = self.create_entry(configuration);
                let current = entry.context.clone();
                self.entries.push(entry);
                Effect::Pushed { previous, current }
            }
            NavCommand::Pop => {
                if self.entries.len() <= 1 {
                    return Effect::Exit;
                }
                let Some(removed) = self.entries.pop() else {
                    return Effect::Exit;
                };
                self.context
                    .state_keeper()
                    .unregister(&self.entry_key(self.entries.len()));
                let Some(current) = self.entries.last().map(|e| e.context.clone()) else {
                    return Effect::Exit;
                };
                Effect::Popped { removed, current }
            }
        }
    }

    fn configurations(&self) -> Vec<C> {
        self.entries.iter().map(|e| e.configuration.clone()).collect()
    }

    fn snapshot(&self) -> Option<ChildStack<C, T>> {
        let (active, rest) = self.entries.split_last()?;
        let to_child = |entry: &Entry<C, T>| Child {
            configuration: entry.configuration.clone(),
            instance: Rc::clone(&entry.instance),
        };
        Some(ChildStack {
            active: to_child(active),
            back_stack: rest.iter().map(to_child).collect(),
        })
    }
}

/// Owner of a navigation stack and of the components created for it.
pub struct ChildStackController<C, T> {
    core: Rc<RefCell<StackCore<C, T>>>,
    state: MutableValue<ChildStack<C, T>>,
}

impl<C, T> ChildStackController<C, T>
where
    C: Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + 'static,
    T: 'static,
{
    /// Build the stack and attach it to `navigation`.
    ///
    /// The stack is restored from `context`'s state keeper under `key` when a
    /// previous run saved one, otherwise it starts as `[initial]`. Popping the
    /// last entry leaves the stack untouched and calls `on_exit` instead.
    pub fn new<F, E>(
        context: &ComponentContext,
        navigation: &StackNavigation<C>,
        key: &str,
        initial: C,
        factory: F,
        on_exit: E,
    ) -> Self
    where
        F: Fn(C, ComponentContext) -> T + 'static,
        E: Fn() + 'static,
    {
        let configurations = restore_configurations(context, key, initial);

        let mut core = StackCore {
            context: context.clone(),
            key: key.to_string(),
            entries: Vec::with_capacity(configurations.len()),
            factory: Box::new(factory),
        };
        for configuration in configurations {
            let entry = core.create_entry(configuration);
            core.entries.push(entry);
        }
        if let Some(top) = core.entries.last() {
            top.context.lifecycle().resume();
        }

        let Some(initial_snapshot) = core.snapshot() else {
            unreachable!("stack is built from a non-empty configuration list");
        };
        let core = Rc::new(RefCell::new(core));
        let state = MutableValue::new(initial_snapshot);

        let weak_core: Weak<RefCell<StackCore<C, T>>> = Rc::downgrade(&core);
        context.state_keeper().register(key, move || {
            weak_core
                .upgrade()
                .map(|core| core.borrow().configurations())
                .unwrap_or_default()
        });

        // Screens hold the navigation handle, so the handler must not own
        // anything that holds screens.
        let weak_core = Rc::downgrade(&core);
        let weak_state: WeakMutableValue<ChildStack<C, T>> = state.downgrade();
        navigation.attach(Rc::new(move |command: NavCommand<C>| {
            let (Some(core), Some(publish)) = (weak_core.upgrade(), weak_state.upgrade()) else {
                tracing::debug!(?command, "stack disposed, command dropped");
                return;
            };
            apply_command(&core, &publish, &on_exit, command);
        }));

        Self { core, state }
    }

    /// Observable snapshots. Subscribers get the current stack first.
    pub fn stack(&self) -> Value<ChildStack<C, T>> {
        self.state.as_value()
    }

    pub fn configurations(&self) -> Vec<C> {
        self.core.borrow().configurations()
    }

    pub fn len(&self) -> usize {
        self.core.borrow().entries.len()
    }

    /// Never true; popping the last entry is refused.
    pub fn is_empty(&self) -> bool {
        self.core.borrow().entries.is_empty()
    }

    /// Context of the entry at `index`, bottom first.
    pub fn entry_context(&self, index: usize) -> Option<ComponentContext> {
        self.core
            .borrow()
            .entries
            .get(index)
            .map(|entry| entry.context.clone())
    }
}

/// Disposing the stack destroys every entry, top first, and withdraws its
/// state so a later save does not record a stack that no longer exists.
impl<C, T> Drop for ChildStackController<C, T> {
    fn drop(&mut self) {
        let Ok(core) = self.core.try_borrow() else {
            return;
        };
        let keeper = core.context.state_keeper();
        keeper.unregister(&core.key);
        for (index, entry) in core.entries.iter().enumerate().rev() {
            keeper.unregister(&core.entry_key(index));
            entry.context.lifecycle().destroy();
        }
        tracing::debug!(key = %core.key, depth = core.entries.len(), "stack disposed");
    }
}

fn restore_configurations<C>(context: &ComponentContext, key: &str, initial: C) -> Vec<C>
where
    C: DeserializeOwned + fmt::Debug,
{
    match context.state_keeper().consume::<Vec<C>>(key) {
        Ok(Some(configurations)) if !configurations.is_empty() => {
            tracing::info!(key, depth = configurations.len(), "stack restored");
            configurations
        }
        Ok(Some(_)) => {
            tracing::warn!(key, "restored stack was empty, starting fresh");
            vec![initial]
        }
        Ok(None) => vec![initial],
        Err(err) => {
            tracing::warn!(key, error = %err, "restored stack unreadable, starting fresh");
            vec![initial]
        }
    }
}

fn apply_command<C, T>(
    core: &Rc<RefCell<StackCore<C, T>>>,
    publish: &MutableValue<ChildStack<C, T>>,
    on_exit: &dyn Fn(),
    command: NavCommand<C>,
) where
    C: Clone + fmt::Debug + 'static,
    T: 'static,
{
    let effect = core.borrow_mut().apply(command);
    match effect {
        Effect::Pushed { previous, current } => {
            if let Some(previous) = previous {
                previous.lifecycle().pause();
            }
            current.lifecycle().resume();
        }
        Effect::Popped { removed, current } => {
            removed.context.lifecycle().destroy();
            current.lifecycle().resume();
        }
        Effect::Exit => {
            tracing::info!("back pressed on the last entry, exiting");
            on_exit();
            return;
        }
    }
    let snapshot = core.borrow().snapshot();
    if let Some(snapshot) = snapshot {
        publish.set(snapshot);
    }
}
