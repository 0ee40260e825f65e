//! Text measurement for layout
//!
//! Provides a trait for measuring wrapped text during layout, plus an
//! estimating measurer for hosts without a font system.

use crate::geometry::Size;

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Bold,
}

/// Font description handed to the host
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Font family name (None = system font)
    pub family: Option<String>,
    /// Point size
    pub size: f32,
    /// Weight
    pub weight: FontWeight,
}

impl Font {
    /// Regular system font
    pub fn system(size: f32) -> Self {
        Self {
            family: None,
            size,
            weight: FontWeight::Regular,
        }
    }

    /// Bold system font
    pub fn bold_system(size: f32) -> Self {
        Self {
            family: None,
            size,
            weight: FontWeight::Bold,
        }
    }

    /// Named font family
    pub fn named(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: Some(family.into()),
            size,
            weight: FontWeight::Regular,
        }
    }

    /// Set the weight
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

/// Text layout options that affect measurement
#[derive(Debug, Clone)]
pub struct TextLayoutOptions {
    /// Line height multiplier (1.0 = font size)
    pub line_height: f32,
    /// Maximum width for word wrapping (None = single line)
    pub max_width: Option<f32>,
}

impl Default for TextLayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutOptions {
    /// Create default options
    pub fn new() -> Self {
        Self {
            line_height: 1.2,
            max_width: None,
        }
    }

    /// Set max width for wrapping
    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Width of the widest line in pixels
    pub width: f32,
    /// Height in pixels (accounts for line height and number of lines)
    pub height: f32,
    /// Number of lines (0 for empty text)
    pub line_count: u32,
}

impl TextMetrics {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Trait for measuring text dimensions
///
/// Implementations wrap at word boundaries when a max width is set and never
/// report a width above it. A max width narrower than one glyph, zero or
/// negative included, wraps after every glyph.
pub trait TextMeasurer {
    /// Measure the dimensions of a text string with full layout options
    fn measure_with_options(
        &self,
        text: &str,
        font: &Font,
        options: &TextLayoutOptions,
    ) -> TextMetrics;

    /// Measure text with default options (single line)
    fn measure(&self, text: &str, font: &Font) -> TextMetrics {
        self.measure_with_options(text, font, &TextLayoutOptions::new())
    }

    /// Bounding box of `text` wrapped to `max_width` with unbounded height
    fn bounding_size(&self, text: &str, font: &Font, max_width: f32) -> Size {
        self.measure_with_options(text, font, &TextLayoutOptions::new().with_max_width(max_width))
            .size()
    }
}

/// A text measurer that uses estimates
///
/// Every glyph is assumed to be a fixed fraction of the font size wide
/// (wider for heavier weights). Lines break greedily at whitespace; a word
/// longer than the max width is broken between characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    fn glyph_width(font: &Font) -> f32 {
        let factor = match font.weight {
            FontWeight::Regular => 0.5,
            FontWeight::Medium => 0.55,
            FontWeight::Bold => 0.6,
        };
        font.size * factor
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_with_options(
        &self,
        text: &str,
        font: &Font,
        options: &TextLayoutOptions,
    ) -> TextMetrics {
        let glyph = Self::glyph_width(font);
        // A wrap width narrower than one glyph still fits one glyph per line
        let max_width = options.max_width.map_or(f32::MAX, |w| w.max(glyph));
        let per_line = ((max_width / glyph).floor() as usize).max(1);

        let mut widest = 0usize;
        let mut line_count = 0u32;

        for paragraph in text.split('\n') {
            let mut current = 0usize;
            let mut has_line = false;

            for word in paragraph.split_whitespace() {
                let mut len = word.chars().count();
                if current > 0 && current + 1 + len <= per_line {
                    current += 1 + len;
                    continue;
                }
                if current > 0 {
                    widest = widest.max(current);
                    line_count += 1;
                }
                // Break words that cannot fit on a line of their own
                while len > per_line {
                    widest = widest.max(per_line);
                    line_count += 1;
                    len -= per_line;
                }
                current = len;
                has_line = true;
            }

            if has_line {
                widest = widest.max(current);
                line_count += 1;
            } else if !text.is_empty() && text.contains('\n') {
                // Blank line inside multi-line text still takes vertical space
                line_count += 1;
            }
        }

        let width = (widest as f32 * glyph).min(max_width);
        let height = font.size * options.line_height * line_count as f32;

        TextMetrics {
            width,
            height,
            line_count,
        }
    }
}
