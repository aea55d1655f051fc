//! Rendering of the panel's notification line.

use crate::panel::{Toast, ToastPhase};

/// Renders the toast as a single line; hidden toasts render empty.
#[must_use]
pub fn view(toast: &Toast) -> String {
    match toast.phase() {
        ToastPhase::Hidden => String::new(),
        ToastPhase::Visible => format!("» {}", toast.message()),
        ToastPhase::FadingOut => format!("\x1b[2m» {}\x1b[0m", toast.message()),
    }
}
