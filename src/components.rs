use bevy::prelude::*;

/// Marks a sprite as the visual for one field cell.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCell {
    pub column: usize,
    pub row: usize,
}
