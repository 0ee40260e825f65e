//! Humble Alert
//!
//! A small transient notification box for mobile UIs: a bold title, an
//! optional message, an auto-dismiss timeout and optional tap-to-dismiss. The
//! alert positions itself at the top, center or bottom of its container,
//! moves above the software keyboard and re-lays out on rotation.
//!
//! The host UI framework is reached only through the
//! [`humble_platform::Platform`] traits, so the same component runs against a
//! native backend or the in-memory `humble_headless` host.
//!
//! # Modules
//!
//! - [`alert`] - The [`AlertView`] component and its show/hide lifecycle
//! - [`context`] - Platform handle, configuration and attached-alert registry
//! - [`layout`] - Pure frame computation
//! - [`state`] - Lifecycle state machine
//! - [`style`] - Positions and color schemes
//! - [`config`] - Metrics and timing defaults, loadable from TOML
//!
//! # Example
//!
//! ```ignore
//! use humble_alert::prelude::*;
//!
//! let ctx = AlertContext::new(platform);
//! let alert = AlertView::with_title(&ctx, "Copied to clipboard");
//! alert.set_style(AlertStyle::Dark);
//! alert.show()?;
//! ```

pub mod alert;
pub mod config;
pub mod context;
pub mod error;
pub mod layout;
pub mod state;
pub mod style;

pub use alert::{AlertView, DismissCallback};
pub use config::AlertConfig;
pub use context::{frontmost_container, AlertContext, ContainerResolver};
pub use error::{AlertError, Result};
pub use layout::{compute_layout, max_label_width, AlertLayout, KeyboardState, LayoutInput};
pub use state::{AlertEvent, AlertState};
pub use style::{AlertPosition, AlertStyle, Palette};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::alert::AlertView;
    pub use crate::config::AlertConfig;
    pub use crate::context::AlertContext;
    pub use crate::error::{AlertError, Result};
    pub use crate::state::AlertState;
    pub use crate::style::{AlertPosition, AlertStyle};
}
