//! The alert view component
//!
//! [`AlertView`] is a cheap cloneable handle over single-threaded shared
//! state. Platform callbacks (animation completions, timers, taps, keyboard
//! and orientation events) only capture weak handles; while an alert is
//! attached the [`AlertContext`] keeps it alive, so callers may drop their
//! handle right after [`AlertView::show`].
//!
//! # Lifecycle
//!
//! ```text
//! Hidden --show--> Showing --fade in--> Visible --hide--> Hiding --fade out--> Hidden
//!                     |                                     ^
//!                     +---------------hide------------------+
//! ```
//!
//! The auto-dismiss timer is armed once the fade in completes and is cancelled
//! first thing in [`AlertView::hide`].
//!
//! # Example
//!
//! ```ignore
//! let ctx = AlertContext::new(platform);
//! let alert = AlertView::with_message(&ctx, "Saved", "Your changes are safe.");
//! alert.set_position(AlertPosition::Top);
//! alert.set_on_dismissed(|| tracing::info!("gone"));
//! alert.show()?;
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use humble_platform::{
    EventKind, EventListener, Font, GestureId, Label, LabelSlot, Orientation, PlatformEvent,
    Rect, SubscriptionId, TapHandler, TimerId, ViewId,
};
use smallvec::SmallVec;

use crate::context::AlertContext;
use crate::error::{AlertError, Result};
use crate::layout::{compute_layout, AlertLayout, KeyboardState, LayoutInput};
use crate::state::{AlertEvent, AlertState};
use crate::style::{AlertPosition, AlertStyle};

/// Callback fired once the alert has faded out and left its container
pub type DismissCallback = Rc<dyn Fn() + 'static>;

struct Inner {
    title: String,
    message: String,
    position: AlertPosition,
    style: AlertStyle,
    timeout: Duration,
    dismissible: bool,
    top_content_margin: f32,
    bottom_content_margin: f32,
    title_font: Font,
    message_font: Font,
    on_dismissed: Option<DismissCallback>,

    state: AlertState,
    is_visible: bool,
    keyboard: KeyboardState,
    orientation: Orientation,
    inner_margin: f32,

    timer: Option<TimerId>,
    tap: Option<GestureId>,
    tap_handler: TapHandler,
    subscriptions: SmallVec<[SubscriptionId; 3]>,
    last_layout: Option<AlertLayout>,
}

struct Shared {
    ctx: Rc<AlertContext>,
    view: ViewId,
    inner: RefCell<Inner>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        let platform = self.ctx.platform();

        if let Some(timer) = inner.timer.take() {
            platform.cancel(timer);
        }
        for subscription in inner.subscriptions.drain(..) {
            platform.unsubscribe(subscription);
        }
        if let Some(tap) = inner.tap.take() {
            platform.remove_gesture(self.view, tap);
        }
        platform.destroy_view(self.view);

        tracing::debug!("AlertView {:?} disposed", self.view);
    }
}

/// Weak handle captured by platform callbacks
struct WeakAlert(Weak<Shared>);

impl WeakAlert {
    fn upgrade(&self) -> Option<AlertView> {
        self.0.upgrade().map(|shared| AlertView { shared })
    }
}

/// Transient title/message notification box
#[derive(Clone)]
pub struct AlertView {
    shared: Rc<Shared>,
}

impl AlertView {
    /// Create an alert with explicit content, timeout and dismissibility
    pub fn new(
        ctx: &Rc<AlertContext>,
        title: impl Into<String>,
        message: Option<&str>,
        timeout: Duration,
        dismissible: bool,
    ) -> Self {
        let platform = ctx.platform().clone();
        let config = ctx.config();
        let view = platform.create_view();

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let target = WeakAlert(weak.clone());
            let tap_handler: TapHandler = Rc::new(move || {
                if let Some(alert) = target.upgrade() {
                    tracing::debug!("AlertView {:?} tapped", alert.view_id());
                    alert.hide();
                }
            });

            Shared {
                ctx: ctx.clone(),
                view,
                inner: RefCell::new(Inner {
                    title: title.into(),
                    message: message.unwrap_or_default().to_string(),
                    position: AlertPosition::default(),
                    style: AlertStyle::default().resolve(),
                    timeout,
                    dismissible: false,
                    top_content_margin: 0.0,
                    bottom_content_margin: 0.0,
                    title_font: config.title_font(),
                    message_font: config.message_font(),
                    on_dismissed: None,
                    state: AlertState::Hidden,
                    is_visible: false,
                    keyboard: KeyboardState::default(),
                    orientation: platform.orientation(),
                    inner_margin: config.inner_margin(platform.idiom()),
                    timer: None,
                    tap: None,
                    tap_handler,
                    subscriptions: SmallVec::new(),
                    last_layout: None,
                }),
            }
        });

        let alert = Self { shared };
        alert.subscribe_events();
        platform.set_opacity(view, 0.0);
        alert.set_style(AlertStyle::Standard);
        alert.set_dismissible(dismissible);

        tracing::debug!(
            "AlertView {:?} created (timeout {:?}, dismissible {})",
            view,
            timeout,
            dismissible
        );
        alert
    }

    /// Title-only alert, dismissible, with the configured title-only timeout
    pub fn with_title(ctx: &Rc<AlertContext>, title: impl Into<String>) -> Self {
        let timeout = ctx.config().title_only_timeout();
        Self::new(ctx, title, None, timeout, true)
    }

    /// Title + message alert, dismissible, with the configured title + message timeout
    pub fn with_message(ctx: &Rc<AlertContext>, title: impl Into<String>, message: &str) -> Self {
        let timeout = ctx.config().title_message_timeout();
        Self::new(ctx, title, Some(message), timeout, true)
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Present the alert in the frontmost container
    ///
    /// Does nothing while the alert is already showing or visible.
    pub fn show(&self) -> Result<()> {
        if self.state().is_presenting() {
            return Ok(());
        }
        let container = self
            .shared
            .ctx
            .frontmost_container()
            .ok_or(AlertError::NoContainer)?;
        self.show_in(container)
    }

    /// Present the alert in a specific container
    ///
    /// Other alerts among the container's direct children are hidden first.
    /// Only a hidden alert can be shown; the call is ignored in every other
    /// state, including while a fade out is still running.
    pub fn show_in(&self, container: ViewId) -> Result<()> {
        let state = self.state();
        if state != AlertState::Hidden {
            tracing::debug!("AlertView {:?}: show ignored in {:?}", self.view_id(), state);
            return Ok(());
        }

        {
            let inner = self.shared.inner.borrow();
            if inner.title.is_empty() && inner.message.is_empty() {
                tracing::warn!(
                    "AlertView {:?} shown without a title or a message",
                    self.shared.view
                );
            }
        }

        let ctx = self.shared.ctx.clone();
        let platform = ctx.platform().clone();
        let view = self.shared.view;

        for other in ctx.alerts_in(container) {
            if other != *self {
                other.hide();
            }
        }

        platform.attach(container, view)?;
        ctx.retain(self);
        tracing::debug!("AlertView {:?} attached to {:?}", view, container);

        self.transition(AlertEvent::Show);
        self.shared.inner.borrow_mut().is_visible = true;
        self.layout();

        let target = self.downgrade();
        platform.animate_opacity(
            view,
            1.0,
            ctx.config().fade_duration(),
            Box::new(move || {
                if let Some(alert) = target.upgrade() {
                    alert.finish_fade_in();
                }
            }),
        );
        Ok(())
    }

    /// Fade the alert out, detach it and fire the dismiss callback
    ///
    /// Safe to call in any state; only the first call of a lifecycle has an
    /// effect.
    pub fn hide(&self) {
        let timer = self.shared.inner.borrow_mut().timer.take();
        let platform = self.shared.ctx.platform().clone();
        if let Some(timer) = timer {
            platform.cancel(timer);
            tracing::debug!("AlertView {:?}: auto-dismiss timer cancelled", self.view_id());
        }

        if !self.transition(AlertEvent::Hide) {
            return;
        }

        let target = self.downgrade();
        platform.animate_opacity(
            self.shared.view,
            0.0,
            self.shared.ctx.config().fade_duration(),
            Box::new(move || {
                if let Some(alert) = target.upgrade() {
                    alert.finish_fade_out();
                }
            }),
        );
    }

    fn finish_fade_in(&self) {
        if !self.transition(AlertEvent::FadeInComplete) {
            return;
        }

        let timeout = self.shared.inner.borrow().timeout;
        let platform = self.shared.ctx.platform().clone();
        let target = self.downgrade();
        let timer = platform.schedule(
            timeout,
            Box::new(move || {
                if let Some(alert) = target.upgrade() {
                    alert.on_timeout();
                }
            }),
        );

        let mut inner = self.shared.inner.borrow_mut();
        if inner.state == AlertState::Visible {
            inner.timer = Some(timer);
            tracing::debug!("AlertView {:?}: auto-dismiss in {:?}", self.shared.view, timeout);
        } else {
            drop(inner);
            platform.cancel(timer);
        }
    }

    fn on_timeout(&self) {
        self.shared.inner.borrow_mut().timer = None;
        tracing::debug!("AlertView {:?}: timed out", self.view_id());
        self.hide();
    }

    fn finish_fade_out(&self) {
        if !self.transition(AlertEvent::FadeOutComplete) {
            return;
        }

        let callback = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.is_visible = false;
            inner.on_dismissed.clone()
        };

        let view = self.shared.view;
        self.shared.ctx.platform().detach(view);
        self.shared.ctx.release(view);
        tracing::debug!("AlertView {:?} detached", view);

        if let Some(callback) = callback {
            callback();
        }
    }

    fn transition(&self, event: AlertEvent) -> bool {
        let mut inner = self.shared.inner.borrow_mut();
        match inner.state.on_event(event) {
            Some(next) => {
                tracing::debug!(
                    "AlertView {:?}: {:?} -> {:?} on {:?}",
                    self.shared.view,
                    inner.state,
                    next,
                    event
                );
                inner.state = next;
                true
            }
            None => {
                tracing::trace!(
                    "AlertView {:?}: {:?} ignored in {:?}",
                    self.shared.view,
                    event,
                    inner.state
                );
                false
            }
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Recompute and apply the frame and label layout
    ///
    /// Skipped while the alert has no container.
    pub fn layout(&self) {
        let ctx = self.shared.ctx.clone();
        let platform = ctx.platform().clone();
        let view = self.shared.view;

        let Some(container) = platform.parent(view) else {
            tracing::trace!("AlertView {:?}: layout skipped, not attached", view);
            return;
        };
        let Some(parent) = platform.bounds(container) else {
            return;
        };
        let idiom = platform.idiom();

        let (layout, title, message) = {
            let inner = self.shared.inner.borrow();
            let input = LayoutInput {
                title: &inner.title,
                message: &inner.message,
                title_font: &inner.title_font,
                message_font: &inner.message_font,
                idiom,
                parent,
                position: inner.position,
                top_content_margin: inner.top_content_margin,
                bottom_content_margin: inner.bottom_content_margin,
                inner_margin: inner.inner_margin,
                keyboard: inner.keyboard,
            };
            let layout = compute_layout(&input, ctx.config(), &*platform);

            let text = inner.style.palette().text;
            let title = Label::new(
                inner.title.clone(),
                inner.title_font.clone(),
                text,
                layout.title,
            );
            let message = Label::new(
                inner.message.clone(),
                inner.message_font.clone(),
                text,
                layout.message.unwrap_or(Rect::ZERO),
            );
            (layout, title, message)
        };

        platform.set_frame(view, layout.frame);
        platform.set_label(view, LabelSlot::Title, &title);
        platform.set_label(view, LabelSlot::Message, &message);
        self.shared.inner.borrow_mut().last_layout = Some(layout);

        tracing::debug!("AlertView {:?}: laid out at {:?}", view, layout.frame);
    }

    fn set_needs_layout(&self) {
        if self.state().is_attached() {
            self.layout();
        }
    }

    // =========================================================================
    // Platform events
    // =========================================================================

    fn subscribe_events(&self) {
        let platform = self.shared.ctx.platform().clone();
        let subscriptions: SmallVec<[SubscriptionId; 3]> = EventKind::ALL
            .iter()
            .map(|kind| {
                let target = self.downgrade();
                let listener: EventListener = Rc::new(move |event: &PlatformEvent| {
                    if let Some(alert) = target.upgrade() {
                        alert.handle_event(event);
                    }
                });
                platform.subscribe(*kind, listener)
            })
            .collect();
        self.shared.inner.borrow_mut().subscriptions = subscriptions;
    }

    fn handle_event(&self, event: &PlatformEvent) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            match *event {
                PlatformEvent::KeyboardWillShow { height } => {
                    inner.keyboard = KeyboardState {
                        visible: true,
                        height,
                    };
                }
                PlatformEvent::KeyboardWillHide => inner.keyboard.visible = false,
                PlatformEvent::OrientationChanged(orientation) => {
                    inner.orientation = orientation;
                }
            }
        }
        tracing::trace!("AlertView {:?} received {:?}", self.shared.view, event);
        self.set_needs_layout();
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn set_title(&self, title: impl Into<String>) {
        self.shared.inner.borrow_mut().title = title.into();
        self.set_needs_layout();
    }

    /// Set the message, an empty message removes the message row
    pub fn set_message(&self, message: impl Into<String>) {
        self.shared.inner.borrow_mut().message = message.into();
        self.set_needs_layout();
    }

    pub fn set_position(&self, position: AlertPosition) {
        self.shared.inner.borrow_mut().position = position;
        self.set_needs_layout();
    }

    /// Extra distance from the top edge, e.g. to clear a navigation bar
    pub fn set_top_content_margin(&self, margin: f32) {
        self.shared.inner.borrow_mut().top_content_margin = margin;
        self.set_needs_layout();
    }

    /// Extra distance from the bottom edge, e.g. to clear a tab bar
    pub fn set_bottom_content_margin(&self, margin: f32) {
        self.shared.inner.borrow_mut().bottom_content_margin = margin;
        self.set_needs_layout();
    }

    pub fn set_title_font(&self, font: Font) {
        self.shared.inner.borrow_mut().title_font = font;
        self.set_needs_layout();
    }

    pub fn set_message_font(&self, font: Font) {
        self.shared.inner.borrow_mut().message_font = font;
        self.set_needs_layout();
    }

    /// Set the color scheme, [`AlertStyle::Standard`] is stored as Light
    pub fn set_style(&self, style: AlertStyle) {
        let style = style.resolve();
        self.shared.inner.borrow_mut().style = style;
        self.shared
            .ctx
            .platform()
            .set_decoration(self.shared.view, &style.decoration());
        self.set_needs_layout();
    }

    /// Set the auto-dismiss delay, applies from the next fade in
    pub fn set_timeout(&self, timeout: Duration) {
        self.shared.inner.borrow_mut().timeout = timeout;
    }

    /// Attach or detach the tap-to-dismiss recognizer
    pub fn set_dismissible(&self, dismissible: bool) {
        let (tap, handler) = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.dismissible = dismissible;
            (inner.tap, inner.tap_handler.clone())
        };

        let platform = self.shared.ctx.platform();
        let view = self.shared.view;
        match (dismissible, tap) {
            (true, None) => {
                let gesture = platform.add_tap(view, handler);
                self.shared.inner.borrow_mut().tap = Some(gesture);
            }
            (false, Some(gesture)) => {
                platform.remove_gesture(view, gesture);
                self.shared.inner.borrow_mut().tap = None;
            }
            _ => {}
        }
    }

    /// Set the callback fired after the alert faded out and detached
    pub fn set_on_dismissed(&self, callback: impl Fn() + 'static) {
        self.shared.inner.borrow_mut().on_dismissed = Some(Rc::new(callback));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn title(&self) -> String {
        self.shared.inner.borrow().title.clone()
    }

    pub fn message(&self) -> String {
        self.shared.inner.borrow().message.clone()
    }

    pub fn position(&self) -> AlertPosition {
        self.shared.inner.borrow().position
    }

    pub fn style(&self) -> AlertStyle {
        self.shared.inner.borrow().style
    }

    pub fn timeout(&self) -> Duration {
        self.shared.inner.borrow().timeout
    }

    pub fn is_dismissible(&self) -> bool {
        self.shared.inner.borrow().dismissible
    }

    pub fn top_content_margin(&self) -> f32 {
        self.shared.inner.borrow().top_content_margin
    }

    pub fn bottom_content_margin(&self) -> f32 {
        self.shared.inner.borrow().bottom_content_margin
    }

    pub fn title_font(&self) -> Font {
        self.shared.inner.borrow().title_font.clone()
    }

    pub fn message_font(&self) -> Font {
        self.shared.inner.borrow().message_font.clone()
    }

    /// True from attach until the fade out completes
    pub fn is_visible(&self) -> bool {
        self.shared.inner.borrow().is_visible
    }

    pub fn state(&self) -> AlertState {
        self.shared.inner.borrow().state
    }

    /// Last keyboard state received from the host
    pub fn keyboard(&self) -> KeyboardState {
        self.shared.inner.borrow().keyboard
    }

    /// Last interface orientation received from the host
    pub fn orientation(&self) -> Orientation {
        self.shared.inner.borrow().orientation
    }

    /// Distance kept from the top/bottom edge on this device class
    pub fn inner_margin(&self) -> f32 {
        self.shared.inner.borrow().inner_margin
    }

    /// Result of the most recent layout pass
    pub fn last_layout(&self) -> Option<AlertLayout> {
        self.shared.inner.borrow().last_layout
    }

    /// Platform view backing the alert
    pub fn view_id(&self) -> ViewId {
        self.shared.view
    }

    pub fn context(&self) -> &Rc<AlertContext> {
        &self.shared.ctx
    }

    fn downgrade(&self) -> WeakAlert {
        WeakAlert(Rc::downgrade(&self.shared))
    }
}

impl PartialEq for AlertView {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for AlertView {}

impl std::fmt::Debug for AlertView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.borrow();
        f.debug_struct("AlertView")
            .field("view", &self.shared.view)
            .field("title", &inner.title)
            .field("message", &inner.message)
            .field("state", &inner.state)
            .field("position", &inner.position)
            .field("style", &inner.style)
            .finish()
    }
}
