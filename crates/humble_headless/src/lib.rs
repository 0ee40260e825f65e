//! Humble Headless Host
//!
//! An in-memory implementation of every [`humble_platform`] trait, driven by
//! a virtual clock. It backs the alert test suites and the demo binary, and
//! lets the alert run without a display.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use humble_headless::HeadlessPlatform;
//!
//! let host = Rc::new(HeadlessPlatform::phone());
//! // ... show alerts against `host` ...
//! host.advance(Duration::from_millis(500));
//! host.run_until_idle();
//! ```

pub mod clock;
mod platform;
pub mod tree;

pub use clock::{TaskKind, TaskQueue};
pub use platform::HeadlessPlatform;
pub use tree::{ViewArena, ViewNode};
