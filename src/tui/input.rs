//! Input handling for the TUI application.
//!
//! This module provides key-to-message mapping for translating terminal key
//! events into application messages. What a key means depends on which
//! control has focus.

use crossterm::event::{KeyCode, KeyModifiers};

use super::components::SliderAction;
use super::messages::AppMsg;
use crate::rating::RatingAxis;

/// The control that currently receives typed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// The car name field.
    #[default]
    Name,
    /// One of the rating sliders.
    Slider(RatingAxis),
}

impl Focus {
    const ORDER: [Self; 4] = [
        Self::Name,
        Self::Slider(RatingAxis::Speed),
        Self::Slider(RatingAxis::Handling),
        Self::Slider(RatingAxis::Looks),
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or_default()
    }

    /// Returns the next control, wrapping after the last slider.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER
            .get(self.position().saturating_add(1))
            .copied()
            .unwrap_or(Self::Name)
    }

    /// Returns the previous control, wrapping before the name field.
    #[must_use]
    pub fn previous(self) -> Self {
        self.position()
            .checked_sub(1)
            .and_then(|index| Self::ORDER.get(index))
            .copied()
            .unwrap_or(Self::Slider(RatingAxis::Looks))
    }
}

/// Maps a key event to an application message given the focused control.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
pub fn map_key_to_message(key: &bubbletea_rs::event::KeyMsg, focus: Focus) -> Option<AppMsg> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return map_control_key(key.key);
    }

    match key.key {
        KeyCode::Esc => Some(AppMsg::Quit),
        KeyCode::F(1) => Some(AppMsg::ToggleHelp),
        KeyCode::Tab | KeyCode::Down => Some(AppMsg::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(AppMsg::FocusPrevious),
        KeyCode::Enter => Some(AppMsg::Load),
        other => match focus {
            Focus::Name => map_name_key(other),
            Focus::Slider(_) => map_slider_key(other),
        },
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_control_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('c') => Some(AppMsg::Quit),
        KeyCode::Char('n') => Some(AppMsg::New),
        KeyCode::Char('s') => Some(AppMsg::Save),
        KeyCode::Char('d') => Some(AppMsg::DeleteAll),
        _ => None,
    }
}

#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
fn map_name_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char(ch) => Some(AppMsg::InsertChar(ch)),
        KeyCode::Backspace => Some(AppMsg::DeleteChar),
        _ => None,
    }
}

fn map_slider_key(code: KeyCode) -> Option<AppMsg> {
    let action = match code {
        KeyCode::Left => SliderAction::Decrement,
        KeyCode::Right => SliderAction::Increment,
        KeyCode::Home => SliderAction::Minimum,
        KeyCode::End => SliderAction::Maximum,
        KeyCode::Char(ch) => {
            let digit = ch.to_digit(10)?;
            SliderAction::Set(u8::try_from(digit).ok()?)
        }
        _ => return None,
    };
    Some(AppMsg::Slider(action))
}
