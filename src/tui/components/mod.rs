//! UI components for the rating panel.
//!
//! Components are stateless: each renders from the props it is given and
//! reports changes back to the owning model.

pub mod slider;
pub mod text_field;
pub mod toast_view;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use slider::{SliderAction, SliderChange, SliderProps};
pub use text_field::TextFieldProps;
