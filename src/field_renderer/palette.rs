use bevy::render::color::Color;

/// Color shown for a field cell code. Unknown codes, negatives included, are black.
pub fn color_of(value: i32) -> Color {
    match value {
        0 => Color::WHITE,
        1 => Color::RED,
        2 => Color::BLUE,
        3 => Color::GREEN,
        4 => Color::YELLOW,
        _ => Color::BLACK,
    }
}
