//! `Model` trait implementation for the rating TUI application.
//!
//! This module contains the `bubbletea_rs::Model` trait implementation for
//! `RatingApp`, handling initialisation, update dispatch, and view rendering.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};
use unicode_width::UnicodeWidthChar;

use super::RatingApp;
use crate::tui::input::map_key_to_message;
use crate::tui::messages::AppMsg;

impl Model for RatingApp {
    fn init() -> (Self, Option<Cmd>) {
        let model = Self::new(crate::tui::get_toast_timings());

        // The handshake result arrives as the first panel event.
        (model, Some(Self::connect_cmd()))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            if let Some(mapped) = map_key_to_message(key_msg, self.focus) {
                return self.handle_message(&mapped);
            }
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }

        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push('\n');
        output.push_str(&self.render_form());
        output.push('\n');
        output.push_str(&self.render_toast());
        output.push_str(&self.render_status_bar());

        self.normalise_viewport(&output)
    }
}

impl RatingApp {
    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are clamped to one column less than the terminal width to avoid
    /// autowrap, and padded with spaces so shorter frames clear stale cells.
    pub(super) fn normalise_viewport(&self, output: &str) -> String {
        let width = usize::from(self.width.max(1));
        let safe_width = width.saturating_sub(1).max(1);
        let height = usize::from(self.height.max(1));

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| pad_or_truncate_line(line, safe_width))
            .collect();
        lines.truncate(height);

        let missing = height.saturating_sub(lines.len());
        let blank = " ".repeat(safe_width);
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}

/// Pads or truncates `line` to `width` visible columns.
///
/// ANSI escape sequences are copied through without counting towards the
/// width, and a reset is appended if truncation cut off the closing one.
fn pad_or_truncate_line(line: &str, width: usize) -> String {
    let mut output = String::new();
    let mut visible = 0_usize;
    let mut in_escape = false;
    let mut had_ansi = false;
    let mut ended_with_reset = false;

    for ch in line.chars() {
        if in_escape {
            output.push(ch);
            ended_with_reset = ch == 'm';
            in_escape = !ch.is_ascii_alphabetic();
            continue;
        }
        if ch == '\x1b' {
            output.push(ch);
            in_escape = true;
            had_ansi = true;
            ended_with_reset = false;
            continue;
        }

        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if visible.saturating_add(char_width) > width {
            break;
        }
        output.push(ch);
        visible = visible.saturating_add(char_width);
    }

    output.push_str(&" ".repeat(width.saturating_sub(visible)));
    if had_ansi && !ended_with_reset {
        output.push_str("\x1b[0m");
    }
    output
}
