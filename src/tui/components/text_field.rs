//! Single-line text input used for the car name.

/// Cursor glyph drawn after the text of a focused field.
const CURSOR: char = '█';

/// Inputs for rendering a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFieldProps<'a> {
    /// Label shown before the value.
    pub label: &'a str,
    /// Current contents.
    pub value: &'a str,
    /// Hint shown while the value is empty.
    pub placeholder: &'a str,
    /// Whether the field has keyboard focus.
    pub focused: bool,
    /// Whether input is ignored.
    pub disabled: bool,
}

/// Renders the field as `label: value`.
#[must_use]
pub fn view(props: &TextFieldProps<'_>) -> String {
    let marker = if props.focused { '>' } else { ' ' };
    let mut line = format!("{marker} {}: ", props.label);
    if props.value.is_empty() && !props.focused {
        line.push_str(&format!("\x1b[2m{}\x1b[0m", props.placeholder));
    } else {
        line.push_str(props.value);
    }
    if props.focused && !props.disabled {
        line.push(CURSOR);
    }

    if props.disabled {
        format!("\x1b[2m{line}\x1b[0m")
    } else {
        line
    }
}

/// Returns `value` with `ch` appended, or `None` for control characters.
#[must_use]
pub fn insert_char(value: &str, ch: char) -> Option<String> {
    if ch.is_control() {
        return None;
    }
    let mut edited = String::with_capacity(value.len() + ch.len_utf8());
    edited.push_str(value);
    edited.push(ch);
    Some(edited)
}

/// Returns `value` without its last character, or `None` when it is empty.
#[must_use]
pub fn delete_char(value: &str) -> Option<String> {
    let mut edited = value.to_owned();
    edited.pop().map(|_| edited)
}
