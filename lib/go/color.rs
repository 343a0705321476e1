use derive_more::Display;
use std::ops::Not;

/// The color of a Go stone.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Color {
    #[display(fmt = "b")]
    Black,
    #[display(fmt = "w")]
    White,
}

impl Color {
    /// The SGF property that records a move of this color.
    pub fn property(&self) -> &'static str {
        match self {
            Color::Black => "B",
            Color::White => "W",
        }
    }

    /// The SGF property that records setup stones of this color.
    pub fn setup_property(&self) -> &'static str {
        match self {
            Color::Black => "AB",
            Color::White => "AW",
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn color_implements_not_operator(c: Color) {
        assert_eq!(!!c, c);
        assert_ne!(!c, c);
    }

    #[proptest]
    fn color_is_displayed_as_gtp_color(c: Color) {
        assert_eq!(c.to_string(), c.property().to_lowercase());
    }
}
