//! Humble Platform Abstraction Layer
//!
//! This crate provides the platform-agnostic traits and types an alert view
//! needs from its host UI framework.
//!
//! # Architecture
//!
//! The host is split into small capability traits, bundled by [`Platform`]:
//!
//! - [`ViewTree`] - View creation, attach/detach, frames, labels and decoration
//! - [`Animator`] - Opacity animations with a completion callback
//! - [`TextMeasurer`] - Constrained multi-line text measurement
//! - [`GestureHost`] - Tap recognizer registration and removal
//! - [`Scheduler`] - Deferred single-shot calls with cancellation
//! - [`NotificationCenter`] - Keyboard and orientation event subscriptions
//! - [`PresentationChain`] - Root container and stacked presentations
//!
//! Everything runs on the host UI thread. Callbacks are plain `'static`
//! closures and never need to be `Send`.
//!
//! # Platform Implementations
//!
//! - `humble_headless` - In-memory host with a virtual clock (tests, demo)
//!
//! # Example
//!
//! ```ignore
//! use humble_platform::*;
//!
//! fn present(platform: &dyn Platform, view: ViewId) -> Result<()> {
//!     let container = platform.root_container().ok_or(PlatformError::Unavailable(
//!         "no root container".to_string(),
//!     ))?;
//!     platform.attach(container, view)?;
//!     platform.animate_opacity(view, 1.0, Duration::from_millis(500), Box::new(|| {}));
//!     Ok(())
//! }
//! ```

mod error;
mod event;
mod geometry;
mod platform;
mod text;
mod view;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{EventKind, Orientation, PlatformEvent};
pub use geometry::{Color, Point, Rect, Size};
pub use platform::{
    Animator, Callback, DeviceIdiom, EventListener, GestureHost, GestureId, NotificationCenter,
    Platform, PresentationChain, Scheduler, SubscriptionId, TapHandler, TimerId, ViewId, ViewTree,
};
pub use text::{
    EstimatedTextMeasurer, Font, FontWeight, TextLayoutOptions, TextMeasurer, TextMetrics,
};
pub use view::{Decoration, Label, LabelSlot, Parallax, Shadow};

pub use std::time::Duration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{EventKind, Orientation, PlatformEvent};
    pub use crate::geometry::{Color, Point, Rect, Size};
    pub use crate::platform::{
        Animator, Callback, DeviceIdiom, EventListener, GestureHost, GestureId,
        NotificationCenter, Platform, PresentationChain, Scheduler, SubscriptionId, TapHandler,
        TimerId, ViewId, ViewTree,
    };
    pub use crate::text::{Font, FontWeight, TextMeasurer};
    pub use crate::view::{Decoration, Label, LabelSlot};
}
