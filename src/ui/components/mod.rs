//! Reusable UI Components
//!
//! ## Components
//!
//! - `InputField` - Text input with focus handling, password masking, and errors

mod input_field;

pub use input_field::{calculate_input_field_height, render_input_field, InputFieldConfig};
