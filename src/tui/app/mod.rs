//! Main TUI application model implementing the MVU pattern.
//!
//! [`RatingApp`] is a thin adapter around the
//! [`RatingPanel`](crate::panel::RatingPanel) reducer: it owns keyboard focus
//! and layout, translates key messages into panel events, and turns the
//! effects the panel returns into bubbletea commands.
//!
//! # Module Structure
//!
//! - `model_impl`: `bubbletea_rs::Model` implementation
//! - `panel_handlers`: Panel events and effect commands
//! - `rendering`: View rendering methods for terminal output

use bubbletea_rs::Cmd;

use crate::panel::{RatingPanel, ToastTimings};
use crate::rating::RatingAxis;

use super::components::SliderProps;
use super::input::Focus;
use super::messages::AppMsg;

mod model_impl;
mod panel_handlers;
mod rendering;

/// Main application model for the rating panel TUI.
#[derive(Debug)]
pub struct RatingApp {
    /// Draft, store connection and toast.
    pub(crate) panel: RatingPanel,
    /// Control receiving typed input.
    pub(crate) focus: Focus,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
    /// Terminal dimensions.
    width: u16,
    height: u16,
}

impl Default for RatingApp {
    fn default() -> Self {
        Self::new(ToastTimings::default())
    }
}

impl RatingApp {
    /// Creates a new application using the stored terminal dimensions.
    #[must_use]
    pub fn new(timings: ToastTimings) -> Self {
        let (width, height) = crate::tui::get_initial_terminal_size();
        Self::with_dimensions(timings, width, height)
    }

    /// Creates a new application with explicit terminal dimensions.
    #[must_use]
    pub fn with_dimensions(timings: ToastTimings, width: u16, height: u16) -> Self {
        Self {
            panel: RatingPanel::new(timings),
            focus: Focus::Name,
            show_help: false,
            width,
            height,
        }
    }

    /// Returns the rating panel.
    #[must_use]
    pub const fn panel(&self) -> &RatingPanel {
        &self.panel
    }

    /// Returns the focused control.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns slider props for `axis` reflecting the current draft.
    pub(crate) fn slider_props(&self, axis: RatingAxis) -> SliderProps {
        SliderProps {
            disabled: !self.panel.is_ready(),
            focused: self.focus == Focus::Slider(axis),
            ..SliderProps::for_axis(axis, self.panel.draft().score(axis))
        }
    }

    /// Handles a message and updates state accordingly.
    ///
    /// Input that would edit the draft or start a store operation is ignored
    /// while the panel is busy.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_panel_input() && !self.panel.is_ready() {
            tracing::trace!("ignoring input while a store operation is in flight");
            return None;
        }

        match msg {
            AppMsg::FocusNext => {
                self.focus = self.focus.next();
                None
            }
            AppMsg::FocusPrevious => {
                self.focus = self.focus.previous();
                None
            }
            AppMsg::InsertChar(ch) => self.handle_insert_char(*ch),
            AppMsg::DeleteChar => self.handle_delete_char(),
            AppMsg::Slider(action) => self.handle_slider(*action),
            AppMsg::Load => self.handle_load(),
            AppMsg::New => self.handle_new(),
            AppMsg::Save => self.handle_save(),
            AppMsg::DeleteAll => self.handle_delete_all(),
            AppMsg::Panel(event) => self.dispatch(event.clone()),
            AppMsg::Quit => {
                self.panel.teardown();
                Some(bubbletea_rs::quit())
            }
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
