//! Transient notification ("toast") state machine.
//!
//! A toast moves `Hidden -> Visible -> FadingOut -> Hidden`. Entering
//! `Visible` arms a single hide timer; when it elapses the toast starts
//! fading, and once the fade completes it is hidden again. Showing a message
//! while the toast is already on screen only replaces the text.
//!
//! Timers are returned as [`ToastEffect`] values rather than started here, so
//! the owner decides how (and whether) to wait. Each visible period carries a
//! [`ToastTicket`]; timer completions with a stale ticket are ignored.

use std::time::Duration;

/// Default time a toast stays fully visible.
pub const DEFAULT_HIDE_AFTER: Duration = Duration::from_millis(2000);

/// Default duration of the fade-out animation.
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(250);

/// Timer settings for the toast lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    /// Time between becoming visible and starting to fade.
    pub hide_after: Duration,
    /// Length of the fade-out animation.
    pub fade: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            hide_after: DEFAULT_HIDE_AFTER,
            fade: DEFAULT_FADE_DURATION,
        }
    }
}

/// Lifecycle phase of the toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastPhase {
    /// Nothing on screen.
    #[default]
    Hidden,
    /// Fully visible; the hide timer is running.
    Visible,
    /// The fade-out animation is running.
    FadingOut,
}

/// Identifies one visible period of the toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToastTicket(u64);

impl ToastTicket {
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Timed work the toast asks its owner to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastEffect {
    /// Wait `after`, then report [`Toast::hide_timer_elapsed`] with `ticket`.
    ArmHideTimer {
        /// Ticket of the visible period the timer belongs to.
        ticket: ToastTicket,
        /// Delay before the toast starts fading.
        after: Duration,
    },
    /// Run the fade animation, then report [`Toast::fade_finished`].
    StartFade {
        /// Ticket of the visible period being faded out.
        ticket: ToastTicket,
        /// Length of the animation.
        duration: Duration,
    },
}

/// The single notification region owned by the rating panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    phase: ToastPhase,
    message: String,
    ticket: ToastTicket,
    timings: ToastTimings,
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(ToastTimings::default())
    }
}

impl Toast {
    /// Creates a hidden toast with the given timings.
    #[must_use]
    pub const fn new(timings: ToastTimings) -> Self {
        Self {
            phase: ToastPhase::Hidden,
            message: String::new(),
            ticket: ToastTicket(0),
            timings,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> ToastPhase {
        self.phase
    }

    /// Returns the most recently shown message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true while the toast is visible or fading.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        !matches!(self.phase, ToastPhase::Hidden)
    }

    /// Returns the ticket of the current (or most recent) visible period.
    #[must_use]
    pub const fn ticket(&self) -> ToastTicket {
        self.ticket
    }

    /// Returns the configured timings.
    #[must_use]
    pub const fn timings(&self) -> ToastTimings {
        self.timings
    }

    /// Records `message` and shows the toast if it is hidden.
    ///
    /// Returns the hide timer to arm when the toast became visible, or
    /// `None` when it was already on screen.
    pub fn show(&mut self, message: impl Into<String>) -> Option<ToastEffect> {
        self.message = message.into();

        if self.is_shown() {
            return None;
        }

        self.phase = ToastPhase::Visible;
        self.ticket = self.ticket.next();
        Some(ToastEffect::ArmHideTimer {
            ticket: self.ticket,
            after: self.timings.hide_after,
        })
    }

    /// Handles expiry of the hide timer armed for `ticket`.
    ///
    /// Returns the fade to start, or `None` for stale or cancelled timers.
    pub fn hide_timer_elapsed(&mut self, ticket: ToastTicket) -> Option<ToastEffect> {
        if ticket != self.ticket || self.phase != ToastPhase::Visible {
            return None;
        }

        self.phase = ToastPhase::FadingOut;
        Some(ToastEffect::StartFade {
            ticket,
            duration: self.timings.fade,
        })
    }

    /// Handles completion of the fade for `ticket`, hiding the toast.
    ///
    /// Returns whether the toast was hidden.
    pub fn fade_finished(&mut self, ticket: ToastTicket) -> bool {
        if ticket != self.ticket || self.phase != ToastPhase::FadingOut {
            return false;
        }

        self.phase = ToastPhase::Hidden;
        true
    }

    /// Cancels a pending hide timer.
    ///
    /// Only a `Visible` toast has a pending timer; a running fade is left to
    /// finish. Returns whether a timer was cancelled.
    pub const fn cancel_hide_timer(&mut self) -> bool {
        if !matches!(self.phase, ToastPhase::Visible) {
            return false;
        }

        self.ticket = self.ticket.next();
        true
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{Toast, ToastEffect, ToastPhase, ToastTimings};

    #[fixture]
    fn toast() -> Toast {
        Toast::new(ToastTimings::default())
    }

    fn arm(toast: &mut Toast, message: &str) -> super::ToastTicket {
        match toast.show(message) {
            Some(ToastEffect::ArmHideTimer { ticket, .. }) => ticket,
            other => panic!("expected a hide timer, got {other:?}"),
        }
    }

    #[rstest]
    fn showing_a_hidden_toast_arms_one_timer(mut toast: Toast) {
        let effect = toast.show("Car rating loaded: Civic");

        assert_eq!(
            effect,
            Some(ToastEffect::ArmHideTimer {
                ticket: toast.ticket(),
                after: std::time::Duration::from_millis(2000),
            })
        );
        assert_eq!(toast.phase(), ToastPhase::Visible);
        assert_eq!(toast.message(), "Car rating loaded: Civic");
    }

    #[rstest]
    fn showing_while_visible_updates_text_without_new_timer(mut toast: Toast) {
        let ticket = arm(&mut toast, "first");

        assert_eq!(toast.show("second"), None);
        assert_eq!(toast.message(), "second");

        let fade = toast.hide_timer_elapsed(ticket);
        assert!(matches!(fade, Some(ToastEffect::StartFade { .. })));
        assert_eq!(toast.hide_timer_elapsed(ticket), None, "timer fires once");
    }

    #[rstest]
    fn showing_while_fading_updates_text_only(mut toast: Toast) {
        let ticket = arm(&mut toast, "first");
        toast.hide_timer_elapsed(ticket);

        assert_eq!(toast.show("during fade"), None);
        assert_eq!(toast.phase(), ToastPhase::FadingOut);
        assert_eq!(toast.message(), "during fade");
    }

    #[rstest]
    fn full_lifecycle_returns_to_hidden(mut toast: Toast) {
        let ticket = arm(&mut toast, "hello");

        toast.hide_timer_elapsed(ticket);
        assert!(toast.fade_finished(ticket));
        assert_eq!(toast.phase(), ToastPhase::Hidden);

        let next = arm(&mut toast, "again");
        assert_ne!(next, ticket, "each visible period takes a new ticket");
    }

    #[rstest]
    fn stale_tickets_are_ignored(mut toast: Toast) {
        let first = arm(&mut toast, "one");
        toast.hide_timer_elapsed(first);
        toast.fade_finished(first);
        let second = arm(&mut toast, "two");

        assert_eq!(toast.hide_timer_elapsed(first), None);
        assert!(!toast.fade_finished(first));
        assert_eq!(toast.phase(), ToastPhase::Visible);
        assert!(toast.hide_timer_elapsed(second).is_some());
    }

    #[rstest]
    fn cancelling_invalidates_the_pending_timer(mut toast: Toast) {
        let ticket = arm(&mut toast, "bye");

        assert!(toast.cancel_hide_timer());
        assert_eq!(toast.hide_timer_elapsed(ticket), None);
    }

    #[rstest]
    fn cancelling_leaves_a_running_fade_alone(mut toast: Toast) {
        let ticket = arm(&mut toast, "bye");
        toast.hide_timer_elapsed(ticket);

        assert!(!toast.cancel_hide_timer());
        assert!(toast.fade_finished(ticket));
    }
}
