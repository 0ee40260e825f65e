//! View decoration and label descriptions

use crate::geometry::{Color, Rect, Size};
use crate::text::Font;

/// Drop shadow
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color
    pub color: Color,
    /// Offset from the view
    pub offset: Size,
    /// Blur radius
    pub radius: f32,
    /// Shadow opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::white(0.0, 0.1),
            offset: Size::ZERO,
            radius: 30.0,
            opacity: 1.0,
        }
    }
}

/// Tilt-driven parallax applied to a view's center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    /// Maximum horizontal displacement in either direction
    pub horizontal: f32,
    /// Maximum vertical displacement in either direction
    pub vertical: f32,
}

impl Default for Parallax {
    fn default() -> Self {
        Self {
            horizontal: 14.0,
            vertical: 18.0,
        }
    }
}

/// Visual decoration of a view
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    /// Background fill
    pub background: Color,
    /// Corner radius
    pub corner_radius: f32,
    /// Drop shadow (None = no shadow)
    pub shadow: Option<Shadow>,
    /// Motion effect (None = static)
    pub parallax: Option<Parallax>,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            background: Color::white(0.0, 0.45),
            corner_radius: 5.0,
            shadow: Some(Shadow::default()),
            parallax: Some(Parallax::default()),
        }
    }
}

impl Decoration {
    /// Create a decoration with a background color
    pub fn new(background: Color) -> Self {
        Self {
            background,
            ..Default::default()
        }
    }

    /// Set the background color
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the corner radius
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set or clear the shadow
    pub fn shadow(mut self, shadow: Option<Shadow>) -> Self {
        self.shadow = shadow;
        self
    }

    /// Set or clear the parallax effect
    pub fn parallax(mut self, parallax: Option<Parallax>) -> Self {
        self.parallax = parallax;
        self
    }
}

/// Label slots a view exposes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelSlot {
    Title,
    Message,
}

/// A multi-line, word-wrapped label, centered in its frame
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Label text
    pub text: String,
    /// Font
    pub font: Font,
    /// Text color
    pub color: Color,
    /// Frame in the owning view's coordinates
    pub frame: Rect,
}

impl Label {
    pub fn new(text: impl Into<String>, font: Font, color: Color, frame: Rect) -> Self {
        Self {
            text: text.into(),
            font,
            color,
            frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoration_builder() {
        let decoration = Decoration::new(Color::WHITE)
            .corner_radius(8.0)
            .shadow(None);
        assert_eq!(decoration.background, Color::WHITE);
        assert_eq!(decoration.corner_radius, 8.0);
        assert!(decoration.shadow.is_none());
        assert_eq!(decoration.parallax, Some(Parallax::default()));
    }
}
