//! Rendering logic for the rating TUI application.
//!
//! This module contains the view rendering methods that produce string output
//! for display in the terminal. These are pure query methods that read state
//! without modification.

use super::RatingApp;
use crate::rating::RatingAxis;
use crate::tui::components::{TextFieldProps, slider, text_field, toast_view};
use crate::tui::input::Focus;

impl RatingApp {
    /// Renders the header bar.
    pub(super) fn render_header(&self) -> String {
        let title = "Car Ratings";
        let busy_indicator = if self.panel.is_ready() {
            ""
        } else {
            " [Working...]"
        };
        format!("{title}{busy_indicator}\n")
    }

    /// Renders the name field, one slider per axis and the action hints.
    pub(super) fn render_form(&self) -> String {
        let disabled = !self.panel.is_ready();
        let name = text_field::view(&TextFieldProps {
            label: "Car",
            value: &self.panel.draft().id,
            placeholder: "type a car name",
            focused: self.focus == Focus::Name,
            disabled,
        });

        let mut output = name;
        output.push_str("\n\n");
        for axis in RatingAxis::ALL {
            output.push_str(&slider::view(&self.slider_props(axis)));
            output.push('\n');
        }
        output.push('\n');
        output.push_str("Enter:load  Ctrl-N:new  Ctrl-S:save  Ctrl-D:delete all\n");
        output
    }

    /// Renders the toast line, blank while no notice is shown.
    pub(super) fn render_toast(&self) -> String {
        format!("{}\n", toast_view::view(self.panel.toast()))
    }

    /// Renders the status bar with connection state and help hints.
    pub(super) fn render_status_bar(&self) -> String {
        let connection = if self.panel.is_connected() {
            "Store: connected"
        } else {
            "Store: connecting"
        };
        format!("{connection}  Tab:next field  F1:help  Esc:quit\n")
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Fields:
  Tab, Down      Next field
  Shift-Tab, Up  Previous field
  text keys      Edit car name
  Backspace      Delete one character
  Left, Right    Lower or raise the focused rating
  Home, End      Set the focused rating to 0 or 5
  0-5            Set the focused rating

Operations:
  Enter          Load the rating for the typed car name
  Ctrl-N         Start a new rating
  Ctrl-S         Save the current rating
  Ctrl-D         Delete every stored rating

Other:
  F1             Toggle this help
  Esc, Ctrl-C    Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}
