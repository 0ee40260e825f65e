//! Alert position and color styles

use humble_platform::{Color, Decoration};

/// Vertical placement of the alert inside its container
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlertPosition {
    /// Above the bottom edge (and above the keyboard when it is shown)
    #[default]
    Bottom,
    /// Vertically centered
    Center,
    /// Below the top edge
    Top,
}

/// Color scheme of the alert
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlertStyle {
    /// Dark text over a light background
    Light,
    /// Light text over a dark background
    Dark,
    /// Legacy default, always resolves to [`AlertStyle::Light`]
    #[default]
    Standard,
}

/// Colors derived from a style
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
}

impl AlertStyle {
    /// Map the legacy alias onto a concrete scheme
    pub fn resolve(self) -> Self {
        match self {
            AlertStyle::Standard => AlertStyle::Light,
            other => other,
        }
    }

    /// Background and text colors
    pub fn palette(self) -> Palette {
        match self.resolve() {
            AlertStyle::Dark => Palette {
                background: Color::white(0.0, 0.75),
                text: Color::WHITE,
            },
            _ => Palette {
                background: Color::white(1.0, 0.95),
                text: Color::BLACK,
            },
        }
    }

    /// Box decoration: palette background, rounded corners, soft shadow, parallax
    pub fn decoration(self) -> Decoration {
        Decoration::new(self.palette().background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_resolves_to_light() {
        assert_eq!(AlertStyle::Standard.resolve(), AlertStyle::Light);
        assert_eq!(AlertStyle::Standard.resolve().resolve(), AlertStyle::Light);
        assert_eq!(AlertStyle::Dark.resolve(), AlertStyle::Dark);
        assert_eq!(AlertStyle::Standard.palette(), AlertStyle::Light.palette());
    }

    #[test]
    fn test_light_palette_is_dark_on_light() {
        let palette = AlertStyle::Light.palette();
        assert_eq!(palette.background, Color::white(1.0, 0.95));
        assert_eq!(palette.text, Color::BLACK);
        assert!(palette.background.luminance() > palette.text.luminance());
    }

    #[test]
    fn test_dark_palette() {
        let palette = AlertStyle::Dark.palette();
        assert_eq!(palette.background, Color::white(0.0, 0.75));
        assert_eq!(palette.text, Color::WHITE);
    }

    #[test]
    fn test_decoration() {
        let decoration = AlertStyle::Dark.decoration();
        assert_eq!(decoration.background, Color::white(0.0, 0.75));
        assert_eq!(decoration.corner_radius, 5.0);
        assert!(decoration.shadow.is_some());
        assert!(decoration.parallax.is_some());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AlertPosition::default(), AlertPosition::Bottom);
        assert_eq!(AlertStyle::default().resolve(), AlertStyle::Light);
    }
}
