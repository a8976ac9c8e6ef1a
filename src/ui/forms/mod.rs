//! Form rendering module

mod field_renderer;

pub use field_renderer::{draw_field, FieldView, FIELD_HEIGHT};
