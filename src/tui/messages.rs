//! Message types for the TUI update loop.
//!
//! This module defines all message types that can be sent to the application's
//! update function. Messages represent user actions, completions of panel
//! effects, and system events.

use crate::panel::PanelEvent;

use super::components::SliderAction;

/// Messages for the rating panel TUI application.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    // Focus
    /// Move focus to the next control.
    FocusNext,
    /// Move focus to the previous control.
    FocusPrevious,

    // Editing
    /// Append a character to the car name.
    InsertChar(char),
    /// Delete the last character of the car name.
    DeleteChar,
    /// Drive the focused slider.
    Slider(SliderAction),

    // Panel operations
    /// Load the rating named in the name field.
    Load,
    /// Reset the draft.
    New,
    /// Save the draft.
    Save,
    /// Delete every stored rating.
    DeleteAll,

    /// An event for the rating panel, usually the outcome of an effect.
    Panel(PanelEvent),

    // Application lifecycle
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for messages that edit the draft or start a store
    /// operation, which are ignored while the panel is busy.
    #[must_use]
    pub const fn is_panel_input(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::DeleteChar
                | Self::Slider(_)
                | Self::Load
                | Self::New
                | Self::Save
                | Self::DeleteAll
        )
    }
}
