//! Platform traits and handles

use std::rc::Rc;
use std::time::Duration;

use slotmap::new_key_type;

use crate::error::Result;
use crate::event::{EventKind, Orientation, PlatformEvent};
use crate::geometry::{Rect, Size};
use crate::text::TextMeasurer;
use crate::view::{Decoration, Label, LabelSlot};

new_key_type! {
    /// Handle to a view owned by the host
    pub struct ViewId;
    /// Handle to a deferred single-shot call
    pub struct TimerId;
    /// Handle to a gesture recognizer attached to a view
    pub struct GestureId;
    /// Handle to a notification center subscription
    pub struct SubscriptionId;
}

/// One-shot continuation scheduled by the host (animation end, deferred call)
pub type Callback = Box<dyn FnOnce() + 'static>;

/// Handler invoked when a tap recognizer fires
pub type TapHandler = Rc<dyn Fn() + 'static>;

/// Listener invoked for every event on a subscribed channel
pub type EventListener = Rc<dyn Fn(&PlatformEvent) + 'static>;

/// Device class, drives margins and maximum widths
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceIdiom {
    /// Phone-class device
    #[default]
    Phone,
    /// Tablet-class device
    Tablet,
}

/// View hierarchy owned by the host
pub trait ViewTree {
    /// Create a detached, empty view
    fn create_view(&self) -> ViewId;

    /// Destroy a view, detaching it first
    fn destroy_view(&self, view: ViewId);

    /// Append `view` as the front-most child of `container`
    ///
    /// A view that already has a parent is moved.
    fn attach(&self, container: ViewId, view: ViewId) -> Result<()>;

    /// Remove `view` from its parent (no-op when detached)
    fn detach(&self, view: ViewId);

    /// Current parent of a view
    fn parent(&self, view: ViewId) -> Option<ViewId>;

    /// Direct children of a container, back to front
    fn children(&self, container: ViewId) -> Vec<ViewId>;

    /// Size of a view's bounds
    fn bounds(&self, view: ViewId) -> Option<Size>;

    /// Set a view's frame in its parent's coordinates
    fn set_frame(&self, view: ViewId, frame: Rect);

    /// Set a view's opacity immediately
    fn set_opacity(&self, view: ViewId, opacity: f32);

    /// Set the background, corners, shadow and motion effect of a view
    fn set_decoration(&self, view: ViewId, decoration: &Decoration);

    /// Set the content and frame of one of a view's labels
    fn set_label(&self, view: ViewId, slot: LabelSlot, label: &Label);
}

/// Property animations
pub trait Animator {
    /// Animate a view's opacity to `target` over `duration`
    ///
    /// `on_complete` runs once the animation ends, or when another opacity
    /// animation on the same view interrupts it. Hosts should not run it from
    /// inside this call.
    fn animate_opacity(&self, view: ViewId, target: f32, duration: Duration, on_complete: Callback);
}

/// Gesture recognizers
pub trait GestureHost {
    /// Attach a tap recognizer to a view
    fn add_tap(&self, view: ViewId, handler: TapHandler) -> GestureId;

    /// Remove a recognizer previously returned by [`GestureHost::add_tap`]
    fn remove_gesture(&self, view: ViewId, gesture: GestureId);
}

/// Deferred single-shot calls on the UI thread
pub trait Scheduler {
    /// Run `callback` once after `delay`
    fn schedule(&self, delay: Duration, callback: Callback) -> TimerId;

    /// Cancel a pending call, returns false if it already ran or was cancelled
    fn cancel(&self, timer: TimerId) -> bool;
}

/// Keyboard and orientation broadcasts
pub trait NotificationCenter {
    /// Subscribe a listener to one event channel
    fn subscribe(&self, kind: EventKind, listener: EventListener) -> SubscriptionId;

    /// Remove a subscription (no-op when unknown)
    fn unsubscribe(&self, subscription: SubscriptionId);
}

/// The stack of presented screens, from the root window upwards
pub trait PresentationChain {
    /// Container view of the root screen
    fn root_container(&self) -> Option<ViewId>;

    /// Container of the screen presented over `container`, if any
    fn presented_over(&self, container: ViewId) -> Option<ViewId>;
}

/// Platform abstraction trait
///
/// Implemented by each host backend to give the alert a single handle to
/// every capability it consumes.
pub trait Platform:
    ViewTree + Animator + TextMeasurer + GestureHost + Scheduler + NotificationCenter + PresentationChain
{
    /// Get the platform name
    ///
    /// Returns a string like "headless", "ios" or "android".
    fn name(&self) -> &'static str;

    /// Device class of the current device
    fn idiom(&self) -> DeviceIdiom;

    /// Current interface orientation
    fn orientation(&self) -> Orientation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idiom_default() {
        assert_eq!(DeviceIdiom::default(), DeviceIdiom::Phone);
    }
}
