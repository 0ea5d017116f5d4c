use crate::config::UiConfig;
use crate::navigation::{ComponentContext, SavedState, StateKeeperError, Subscription};
use crate::screens::{RootController, Screen, ScreenStack};
use crate::ui::transition::{direction_between, SlideTransition};
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

/// How the event loop ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitReason {
    /// Back was pressed on the last screen.
    Back,
    /// Explicit quit (Ctrl+C / Ctrl+Q) or input closed.
    Quit,
}

/// What the view currently shows. Updated synchronously by the stack
/// subscription.
pub struct ViewState {
    stack: ScreenStack,
    transition: Option<SlideTransition>,
    transition_frames: u16,
}

impl ViewState {
    fn new(stack: ScreenStack, transition_frames: u16) -> Self {
        Self {
            stack,
            transition: None,
            transition_frames,
        }
    }

    fn on_stack_changed(&mut self, next: &ScreenStack) {
        if let Some(direction) = direction_between(&self.stack, next) {
            tracing::debug!(?direction, depth = next.len(), "active screen changed");
            self.transition = (self.transition_frames > 0).then(|| {
                SlideTransition::new(
                    direction,
                    self.stack.active.instance.clone(),
                    self.transition_frames,
                )
            });
        }
        self.stack = next.clone();
    }

    pub fn stack(&self) -> &ScreenStack {
        &self.stack
    }

    pub fn transition(&self) -> Option<&SlideTransition> {
        self.transition.as_ref()
    }
}

pub struct App {
    root: RootController,
    view: Rc<RefCell<ViewState>>,
    exit_requested: Rc<Cell<bool>>,
    should_quit: bool,
    /// Mounted for the lifetime of the app; dropping it unsubscribes.
    _stack_subscription: Subscription,
}

impl App {
    pub fn new(context: ComponentContext, config: &UiConfig) -> Self {
        let exit_requested = Rc::new(Cell::new(false));
        let exit_flag = Rc::clone(&exit_requested);
        let root = RootController::new(context, move || exit_flag.set(true));

        let stack = root.screen_stack();
        let view = Rc::new(RefCell::new(ViewState::new(
            stack.value(),
            config.transition_frames,
        )));
        let sink = Rc::clone(&view);
        let subscription =
            stack.subscribe(move |next: &ScreenStack| sink.borrow_mut().on_stack_changed(next));

        Self {
            root,
            view,
            exit_requested,
            should_quit: false,
            _stack_subscription: subscription,
        }
    }

    pub fn root(&self) -> &RootController {
        &self.root
    }

    pub fn view(&self) -> Ref<'_, ViewState> {
        self.view.borrow()
    }

    /// Controller of the visible screen. The returned `Rc` is detached from
    /// the view so callbacks can navigate while it is held.
    pub fn active_screen(&self) -> Rc<Screen> {
        Rc::clone(&self.view.borrow().stack.active.instance)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit || self.exit_requested.get()
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn exit_reason(&self) -> ExitReason {
        if self.exit_requested.get() {
            ExitReason::Back
        } else {
            ExitReason::Quit
        }
    }

    pub fn is_animating(&self) -> bool {
        self.view.borrow().transition.is_some()
    }

    pub fn on_tick(&mut self) {
        let mut view = self.view.borrow_mut();
        let finished = view
            .transition
            .as_mut()
            .map(SlideTransition::advance)
            .unwrap_or(false);
        if finished {
            view.transition = None;
        }
    }

    /// Collect the state of the whole tree. Must run while the app is alive:
    /// dropping it disposes the stack and withdraws its suppliers.
    pub fn save_state(&self) -> Result<SavedState, StateKeeperError> {
        self.root.context().state_keeper().save()
    }
}
