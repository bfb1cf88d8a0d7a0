pub mod components;
pub mod field_renderer;
