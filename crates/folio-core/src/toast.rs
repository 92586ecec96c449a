#![forbid(unsafe_code)]

//! Transient toast notifications on a host-supplied clock.
//!
//! A toast slides in when shown, stays for the visible period, plays its exit
//! animation, and is then removed. The queue never reads a wall clock: the
//! host passes a monotonic `now` (e.g. `performance.now()`) to
//! [`ToastQueue::show`] and [`ToastQueue::tick`], which keeps the lifecycle
//! deterministic under test.
//!
//! ```text
//! show(now)            now + visible          now + visible + exit
//!    │  Entering ────────────│  Exiting ──────────────│  removed
//! ```

use std::time::Duration;

use tracing::info;

/// Toast color family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Background color.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Info => "#3B82F6",
            Self::Success => "#10B981",
            Self::Error => "#EF4444",
        }
    }

    /// Class attribute for the toast element.
    #[must_use]
    pub fn class_name(self) -> String {
        format!("notification notification-{}", self.as_str())
    }
}

/// Fixed-position inline style for a toast of `severity`.
#[must_use]
pub fn inline_style(severity: Severity) -> String {
    format!(
        "position: fixed; top: 100px; right: 20px; padding: 1rem 1.5rem; \
         background-color: {}; color: white; border-radius: 0.75rem; \
         box-shadow: 0 10px 25px rgba(0, 0, 0, 0.2); z-index: 10000; \
         animation: {}; font-family: 'Lato', sans-serif; font-weight: 600;",
        severity.color(),
        ENTER_ANIMATION
    )
}

/// CSS `animation` value applied on entry.
pub const ENTER_ANIMATION: &str = "slideInRight 0.3s ease";
/// CSS `animation` value applied when the exit phase starts.
pub const EXIT_ANIMATION: &str = "slideInLeft 0.3s ease reverse";

/// Identifier of a shown toast, unique per queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Exiting,
}

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
    shown_at: Duration,
}

/// A lifecycle step the host must render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTransition {
    /// Switch the element to [`EXIT_ANIMATION`].
    BeginExit(ToastId),
    /// Remove the element.
    Remove(ToastId),
}

/// All live toasts, oldest first.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    visible_for: Duration,
    exit_for: Duration,
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    #[must_use]
    pub fn new(visible_for: Duration, exit_for: Duration) -> Self {
        Self {
            visible_for,
            exit_for,
            next_id: 0,
            toasts: Vec::new(),
        }
    }

    /// Show a toast at `now`.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Duration) -> &Toast {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let message = message.into();
        info!(id = id.0, severity = severity.as_str(), %message, "toast");
        self.toasts.push(Toast {
            id,
            message,
            severity,
            phase: ToastPhase::Entering,
            shown_at: now,
        });
        &self.toasts[self.toasts.len() - 1]
    }

    /// Advance to `now`, returning due transitions in order. A toast whose
    /// whole lifetime elapsed since the last tick yields both transitions.
    pub fn tick(&mut self, now: Duration) -> Vec<ToastTransition> {
        let mut transitions = Vec::new();
        for toast in &mut self.toasts {
            let elapsed = now.saturating_sub(toast.shown_at);
            if toast.phase == ToastPhase::Entering && elapsed >= self.visible_for {
                toast.phase = ToastPhase::Exiting;
                transitions.push(ToastTransition::BeginExit(toast.id));
            }
            if toast.phase == ToastPhase::Exiting && elapsed >= self.visible_for + self.exit_for {
                transitions.push(ToastTransition::Remove(toast.id));
            }
        }
        self.toasts.retain(|toast| {
            !transitions.contains(&ToastTransition::Remove(toast.id))
        });
        transitions
    }

    /// Delay from `shown` until its exit should start, and until removal.
    #[must_use]
    pub fn schedule(&self) -> (Duration, Duration) {
        (self.visible_for, self.visible_for + self.exit_for)
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
