//! Transient feedback cycles for buttons and toasts.
//!
//! # Design
//! - Each target owns one `Idle`/`Active` state machine; a trigger while active is
//!   dropped, never queued.
//! - Reverts are deferred through [`Scheduler`] and hold a cancellable handle.
//! - The board creates button timers lazily and keeps a single toast timer.

use crate::core::events::{ChangeBus, Topic};
use crate::core::scheduler::{Scheduler, TimerHandle};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::{Rc, Weak};
use tracing::debug;

/// Visual tone of a feedback cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Positive confirmation.
    Success,
    /// Failure notice.
    Error,
}

impl FeedbackKind {
    /// CSS class applied while the cycle is active.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => "feedback-success",
            Self::Error => "feedback-error",
        }
    }
}

/// Content shown while a cycle is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackDisplay {
    /// Replacement label or toast text.
    pub message: String,
    /// Success or error styling.
    pub kind: FeedbackKind,
}

/// State of one feedback target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FeedbackPhase {
    /// Resting state.
    #[default]
    Idle,
    /// Transient content is displayed.
    Active(FeedbackDisplay),
}

impl FeedbackPhase {
    /// Whether a cycle is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Active display, if any.
    #[must_use]
    pub const fn display(&self) -> Option<&FeedbackDisplay> {
        match self {
            Self::Active(display) => Some(display),
            Self::Idle => None,
        }
    }
}

#[derive(Debug, Default)]
struct TimerState {
    phase: FeedbackPhase,
    handle: Option<TimerHandle>,
}

/// Single-target feedback state machine.
#[derive(Clone)]
pub struct FeedbackTimer {
    state: Rc<RefCell<TimerState>>,
    scheduler: Rc<dyn Scheduler>,
    revert_after_ms: u32,
    bus: ChangeBus,
}

impl FeedbackTimer {
    /// Create an idle timer that reverts `revert_after_ms` after each trigger.
    #[must_use]
    pub fn new(scheduler: Rc<dyn Scheduler>, revert_after_ms: u32, bus: ChangeBus) -> Self {
        Self {
            state: Rc::new(RefCell::new(TimerState::default())),
            scheduler,
            revert_after_ms,
            bus,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FeedbackPhase {
        self.state.borrow().phase.clone()
    }

    /// Whether a cycle is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.borrow().phase.is_active()
    }

    /// Configured revert delay.
    #[must_use]
    pub const fn revert_after_ms(&self) -> u32 {
        self.revert_after_ms
    }

    /// Start a cycle. Returns `false` (and changes nothing) when one is already active.
    pub fn trigger(&self, message: impl Into<String>, kind: FeedbackKind) -> bool {
        let message = message.into();
        {
            let mut state = self.state.borrow_mut();
            if state.phase.is_active() {
                debug!(%message, "feedback already active; trigger dropped");
                return false;
            }
            state.phase = FeedbackPhase::Active(FeedbackDisplay { message, kind });
        }
        let weak = Rc::downgrade(&self.state);
        let bus = self.bus.clone();
        let handle = self.scheduler.schedule(
            self.revert_after_ms,
            Box::new(move || revert_from_timer(&weak, &bus)),
        );
        self.state.borrow_mut().handle = Some(handle);
        self.bus.publish(Topic::Feedback);
        true
    }

    /// Revert immediately and drop the pending timer.
    pub fn cancel(&self) {
        if revert(&self.state) {
            self.bus.publish(Topic::Feedback);
        }
    }
}

impl std::fmt::Debug for FeedbackTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackTimer")
            .field("phase", &self.state.borrow().phase)
            .field("revert_after_ms", &self.revert_after_ms)
            .finish_non_exhaustive()
    }
}

fn revert_from_timer(state: &Weak<RefCell<TimerState>>, bus: &ChangeBus) {
    let Some(state) = state.upgrade() else {
        return;
    };
    if revert(&state) {
        bus.publish(Topic::Feedback);
    }
}

fn revert(state: &RefCell<TimerState>) -> bool {
    let mut state = state.borrow_mut();
    state.handle = None;
    let previous = std::mem::take(&mut state.phase);
    previous.is_active()
}

/// Controls that carry their own feedback cycle.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Control {
    /// Convert button.
    Upload,
    /// Save-to-history button.
    Save,
    /// Copy-result button.
    Copy,
    /// Delete-all history button.
    DeleteAll,
    /// Load button of one history entry.
    LoadItem(String),
    /// Delete button of one history entry.
    DeleteItem(String),
}

impl Control {
    /// History entry id for per-item controls.
    #[must_use]
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::LoadItem(id) | Self::DeleteItem(id) => Some(id),
            _ => None,
        }
    }
}

/// Feedback timers for every control plus the toast host.
pub struct FeedbackBoard {
    scheduler: Rc<dyn Scheduler>,
    button_ms: u32,
    bus: ChangeBus,
    buttons: RefCell<BTreeMap<Control, FeedbackTimer>>,
    toast: FeedbackTimer,
}

impl FeedbackBoard {
    /// Create a board with the given revert delays.
    #[must_use]
    pub fn new(scheduler: Rc<dyn Scheduler>, button_ms: u32, toast_ms: u32, bus: ChangeBus) -> Self {
        let toast = FeedbackTimer::new(Rc::clone(&scheduler), toast_ms, bus.clone());
        Self {
            scheduler,
            button_ms,
            bus,
            buttons: RefCell::new(BTreeMap::new()),
            toast,
        }
    }

    /// Timer for `control`, created on first use.
    #[must_use]
    pub fn button(&self, control: &Control) -> FeedbackTimer {
        self.buttons
            .borrow_mut()
            .entry(control.clone())
            .or_insert_with(|| {
                FeedbackTimer::new(Rc::clone(&self.scheduler), self.button_ms, self.bus.clone())
            })
            .clone()
    }

    /// Toast timer.
    #[must_use]
    pub const fn toast(&self) -> &FeedbackTimer {
        &self.toast
    }

    /// Current phase of `control` (idle when never triggered).
    #[must_use]
    pub fn phase(&self, control: &Control) -> FeedbackPhase {
        self.buttons
            .borrow()
            .get(control)
            .map_or(FeedbackPhase::Idle, FeedbackTimer::phase)
    }

    /// Active button displays keyed by control.
    #[must_use]
    pub fn active_buttons(&self) -> BTreeMap<Control, FeedbackDisplay> {
        self.buttons
            .borrow()
            .iter()
            .filter_map(|(control, timer)| match timer.phase() {
                FeedbackPhase::Active(display) => Some((control.clone(), display)),
                FeedbackPhase::Idle => None,
            })
            .collect()
    }

    /// Start a button cycle on `control`.
    pub fn flash(&self, control: &Control, message: impl Into<String>, kind: FeedbackKind) -> bool {
        self.button(control).trigger(message, kind)
    }

    /// Start a toast cycle.
    pub fn notify(&self, message: impl Into<String>, kind: FeedbackKind) -> bool {
        self.toast.trigger(message, kind)
    }

    /// Drop the timers of history entries that are no longer listed.
    ///
    /// Pending reverts of dropped timers are cancelled with them.
    pub fn prune_items(&self, live_ids: &HashSet<&str>) {
        let mut dropped_active = false;
        self.buttons.borrow_mut().retain(|control, timer| {
            let keep = control.item_id().is_none_or(|id| live_ids.contains(id));
            dropped_active |= !keep && timer.is_active();
            keep
        });
        if dropped_active {
            self.bus.publish(Topic::Feedback);
        }
    }

    /// Number of button timers currently tracked.
    #[must_use]
    pub fn tracked_buttons(&self) -> usize {
        self.buttons.borrow().len()
    }
}

impl std::fmt::Debug for FeedbackBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackBoard")
            .field("button_ms", &self.button_ms)
            .field("buttons", &self.buttons.borrow().len())
            .field("toast", &self.toast)
            .finish_non_exhaustive()
    }
}
