//! Alert metrics and defaults
//!
//! Every spacing, size and timing constant the alert uses lives in
//! [`AlertConfig`]. The defaults reproduce the stock look; a TOML file can
//! override any subset of them:
//!
//! ```toml
//! vertical_padding = 12.0
//! fade_duration_secs = 0.25
//! title_only_timeout_secs = 3.0
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use humble_platform::{DeviceIdiom, Font};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Alert metrics and timing defaults
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Space between the box edge and the labels, left and right
    pub horizontal_padding: f32,
    /// Base vertical spacing unit (top, bottom and between labels)
    pub vertical_padding: f32,
    /// Bold system font size of the title
    pub title_font_size: f32,
    /// Regular system font size of the message
    pub message_font_size: f32,
    /// Duration of the fade in and fade out
    pub fade_duration_secs: f64,
    /// Distance from the top/bottom edge on phones
    pub phone_inner_margin: f32,
    /// Distance from the top/bottom edge on tablets
    pub tablet_inner_margin: f32,
    /// Horizontal space left free around the box on phones
    pub phone_outer_inset: f32,
    /// Maximum box width on tablets
    pub tablet_max_width: f32,
    /// Auto-dismiss delay of title-only alerts
    pub title_only_timeout_secs: f64,
    /// Auto-dismiss delay of title + message alerts
    pub title_message_timeout_secs: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            horizontal_padding: 18.0,
            vertical_padding: 14.0,
            title_font_size: 17.0,
            message_font_size: 14.0,
            fade_duration_secs: 0.5,
            phone_inner_margin: 25.0,
            tablet_inner_margin: 50.0,
            phone_outer_inset: 40.0,
            tablet_max_width: 520.0,
            title_only_timeout_secs: 4.0,
            title_message_timeout_secs: 6.0,
        }
    }
}

impl AlertConfig {
    /// Parse a configuration from TOML, missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded alert configuration from {}", path.display());
        Ok(config)
    }

    /// Fade in/out duration
    pub fn fade_duration(&self) -> Duration {
        secs(self.fade_duration_secs)
    }

    /// Default timeout of `AlertView::with_title`
    pub fn title_only_timeout(&self) -> Duration {
        secs(self.title_only_timeout_secs)
    }

    /// Default timeout of `AlertView::with_message`
    pub fn title_message_timeout(&self) -> Duration {
        secs(self.title_message_timeout_secs)
    }

    /// Top/bottom distance for a device class
    pub fn inner_margin(&self, idiom: DeviceIdiom) -> f32 {
        match idiom {
            DeviceIdiom::Phone => self.phone_inner_margin,
            DeviceIdiom::Tablet => self.tablet_inner_margin,
        }
    }

    /// Default title font
    pub fn title_font(&self) -> Font {
        Font::bold_system(self.title_font_size)
    }

    /// Default message font
    pub fn message_font(&self) -> Font {
        Font::system(self.message_font_size)
    }
}

/// Negative or non-finite values fall back to zero
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
