//! Bounded slider for a single rating axis.
//!
//! The slider keeps no state of its own: [`view`] renders the props it is
//! given and [`interact`] turns a key action into the change the owner
//! should apply.

use crate::rating::{RatingAxis, Score};

/// Width of the label column.
const LABEL_WIDTH: usize = 10;

const FILLED: char = '■';
const EMPTY: char = '□';

/// Inputs for rendering and driving a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderProps {
    /// Human-readable label.
    pub label: &'static str,
    /// Axis the slider edits.
    pub name: RatingAxis,
    /// Current value.
    pub value: Score,
    /// Whether input is ignored.
    pub disabled: bool,
    /// Whether the slider has keyboard focus.
    pub focused: bool,
}

impl SliderProps {
    /// Creates props for `axis` showing `value`, unfocused and enabled.
    #[must_use]
    pub const fn for_axis(axis: RatingAxis, value: Score) -> Self {
        Self {
            label: axis.label(),
            name: axis,
            value,
            disabled: false,
            focused: false,
        }
    }
}

/// Key-level requests a slider understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderAction {
    /// Raise the value by one.
    Increment,
    /// Lower the value by one.
    Decrement,
    /// Jump to an exact value.
    Set(u8),
    /// Jump to the lowest value.
    Minimum,
    /// Jump to the highest value.
    Maximum,
}

/// A value change reported by a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderChange {
    /// Axis that changed.
    pub name: RatingAxis,
    /// New value.
    pub value: Score,
}

/// Renders `props` as one line: label, bar and numeric value.
///
/// Focused sliders are prefixed with `>`; disabled sliders are dimmed.
#[must_use]
pub fn view(props: &SliderProps) -> String {
    let marker = if props.focused { '>' } else { ' ' };
    let filled = usize::from(props.value.get());
    let empty = usize::from(Score::MAX.get()).saturating_sub(filled);
    let bar: String = std::iter::repeat_n(FILLED, filled)
        .chain(std::iter::repeat_n(EMPTY, empty))
        .collect();
    let line = format!(
        "{marker} {label:<LABEL_WIDTH$} [{bar}] {value}",
        label = props.label,
        value = props.value,
    );

    if props.disabled {
        format!("\x1b[2m{line}\x1b[0m")
    } else {
        line
    }
}

/// Applies `action` to `props`, returning the resulting change.
///
/// Returns `None` when the slider is disabled or when [`SliderAction::Set`]
/// asks for a value outside the score range. Steps saturate at the bounds.
#[must_use]
pub fn interact(props: &SliderProps, action: SliderAction) -> Option<SliderChange> {
    if props.disabled {
        return None;
    }

    let value = match action {
        SliderAction::Increment => props.value.step_up(),
        SliderAction::Decrement => props.value.step_down(),
        SliderAction::Set(raw) => Score::new(raw).ok()?,
        SliderAction::Minimum => Score::MIN,
        SliderAction::Maximum => Score::MAX,
    };

    Some(SliderChange {
        name: props.name,
        value,
    })
}
