//! Headless platform implementation

use std::cell::{Cell, RefCell};
use std::time::Duration;

use humble_platform::{
    Animator, Callback, Decoration, DeviceIdiom, EstimatedTextMeasurer, EventKind, EventListener,
    Font, GestureHost, GestureId, Label, LabelSlot, NotificationCenter, Orientation, Platform,
    PlatformEvent, PresentationChain, Rect, Result, Scheduler, Size, SubscriptionId, TapHandler,
    TextLayoutOptions, TextMeasurer, TextMetrics, TimerId, ViewId, ViewTree,
};
use slotmap::SlotMap;

use crate::clock::{Task, TaskKind, TaskQueue};
use crate::tree::ViewArena;

/// Upper bound of tasks run by one `run_until_idle` call
const MAX_IDLE_TASKS: usize = 10_000;

struct Subscription {
    kind: EventKind,
    listener: EventListener,
}

/// In-memory host with a virtual clock
///
/// Nothing happens on its own: animation completions and deferred calls run
/// only from [`HeadlessPlatform::advance`] or
/// [`HeadlessPlatform::run_until_idle`], and platform events are delivered by
/// [`HeadlessPlatform::post`] and its helpers. Callbacks never run from inside
/// the trait call that registered them.
///
/// Opacity animations apply their target value when they complete. An
/// animation interrupted by a newer one on the same view completes right away
/// without applying its value.
pub struct HeadlessPlatform {
    idiom: DeviceIdiom,
    orientation: Cell<Orientation>,
    tree: RefCell<ViewArena>,
    clock: RefCell<TaskQueue>,
    subscriptions: RefCell<SlotMap<SubscriptionId, Subscription>>,
    root: ViewId,
    /// Presented screens, bottom to top
    presented: RefCell<Vec<ViewId>>,
    measurer: RefCell<Box<dyn TextMeasurer>>,
}

impl HeadlessPlatform {
    /// Create a host whose root container covers a screen of the given size
    pub fn new(idiom: DeviceIdiom, screen: Size) -> Self {
        let mut tree = ViewArena::new();
        let root = tree.create(screen.into());
        let orientation = if screen.width > screen.height {
            Orientation::LandscapeLeft
        } else {
            Orientation::Portrait
        };

        tracing::debug!(
            "HeadlessPlatform created: {:?} {}x{}",
            idiom,
            screen.width,
            screen.height
        );

        Self {
            idiom,
            orientation: Cell::new(orientation),
            tree: RefCell::new(tree),
            clock: RefCell::new(TaskQueue::new()),
            subscriptions: RefCell::new(SlotMap::with_key()),
            root,
            presented: RefCell::new(Vec::new()),
            measurer: RefCell::new(Box::new(EstimatedTextMeasurer)),
        }
    }

    /// A phone-class host with a 390x844 screen
    pub fn phone() -> Self {
        Self::new(DeviceIdiom::Phone, Size::new(390.0, 844.0))
    }

    /// A tablet-class host with a 1024x768 screen
    pub fn tablet() -> Self {
        Self::new(DeviceIdiom::Tablet, Size::new(1024.0, 768.0))
    }

    /// Replace the text measurer
    pub fn set_text_measurer(&self, measurer: impl TextMeasurer + 'static) {
        *self.measurer.borrow_mut() = Box::new(measurer);
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.clock.borrow().now()
    }

    /// Move the clock forward, running every task that falls due on the way
    ///
    /// Tasks queued while advancing run too if they fall due before the end.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let task = self.clock.borrow_mut().pop_due(target);
            match task {
                Some(task) => self.run(task),
                None => break,
            }
        }
        self.clock.borrow_mut().advance_to(target);
    }

    /// Run queued tasks until none remain, jumping the clock as needed
    pub fn run_until_idle(&self) {
        for _ in 0..MAX_IDLE_TASKS {
            let task = self.clock.borrow_mut().pop_next();
            match task {
                Some(task) => self.run(task),
                None => return,
            }
        }
        tracing::warn!("run_until_idle stopped after {} tasks", MAX_IDLE_TASKS);
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.clock.borrow().is_empty()
    }

    /// Pending deferred calls, animations excluded
    pub fn pending_timers(&self) -> usize {
        self.clock.borrow().deferred_count()
    }

    /// Target opacity of the animation running on a view
    pub fn animating_to(&self, view: ViewId) -> Option<f32> {
        match self.clock.borrow().animation_for(view)?.kind {
            TaskKind::Animation { target, .. } => Some(target),
            TaskKind::Deferred => None,
        }
    }

    fn run(&self, task: Task) {
        if let TaskKind::Animation { view, target } = task.kind {
            if !task.interrupted {
                if let Some(node) = self.tree.borrow_mut().get_mut(view) {
                    node.opacity = target;
                }
            }
            tracing::trace!(
                "animation on {:?} to {} finished (interrupted: {}) at {:?}",
                view,
                target,
                task.interrupted,
                task.due
            );
        } else {
            tracing::trace!("deferred call at {:?}", task.due);
        }
        (task.callback)();
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Fire the tap recognizers of a view, returns how many ran
    pub fn tap(&self, view: ViewId) -> usize {
        let handlers = self.tree.borrow().tap_handlers(view);
        tracing::trace!("tap on {:?} ({} recognizers)", view, handlers.len());
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    /// Deliver a platform event to its subscribers
    pub fn post(&self, event: PlatformEvent) {
        if let PlatformEvent::OrientationChanged(orientation) = event {
            self.orientation.set(orientation);
        }

        let kind = event.kind();
        let listeners: Vec<EventListener> = self
            .subscriptions
            .borrow()
            .values()
            .filter(|subscription| subscription.kind == kind)
            .map(|subscription| subscription.listener.clone())
            .collect();

        tracing::trace!("posting {:?} to {} listeners", event, listeners.len());
        for listener in &listeners {
            listener(&event);
        }
    }

    pub fn show_keyboard(&self, height: f32) {
        self.post(PlatformEvent::KeyboardWillShow { height });
    }

    pub fn hide_keyboard(&self) {
        self.post(PlatformEvent::KeyboardWillHide);
    }

    /// Rotate the screen, swapping the container sizes when the axis changes
    pub fn rotate(&self, orientation: Orientation) {
        let was_landscape = self.orientation.get().is_landscape();
        if orientation != Orientation::Unknown && orientation.is_landscape() != was_landscape {
            let mut containers = vec![self.root];
            containers.extend(self.presented.borrow().iter().copied());

            let mut tree = self.tree.borrow_mut();
            for container in containers {
                if let Some(node) = tree.get_mut(container) {
                    node.frame.size = node.frame.size.transposed();
                }
            }
        }
        self.post(PlatformEvent::OrientationChanged(orientation));
    }

    // =========================================================================
    // Screens
    // =========================================================================

    /// Root container
    pub fn root(&self) -> ViewId {
        self.root
    }

    pub fn screen_size(&self) -> Size {
        self.frame(self.root).map(|frame| frame.size).unwrap_or(Size::ZERO)
    }

    /// Present a new full-screen container over the frontmost one
    pub fn present(&self) -> ViewId {
        let size = self.screen_size();
        let container = self.tree.borrow_mut().create(size.into());
        self.presented.borrow_mut().push(container);
        tracing::debug!("presented {:?}", container);
        container
    }

    /// Dismiss the topmost presented container
    pub fn dismiss_presented(&self) -> Option<ViewId> {
        let container = self.presented.borrow_mut().pop();
        tracing::debug!("dismissed {:?}", container);
        container
    }

    /// Create a detached container outside the presentation chain
    pub fn add_container(&self, size: Size) -> ViewId {
        self.tree.borrow_mut().create(size.into())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn frame(&self, view: ViewId) -> Option<Rect> {
        self.tree.borrow().get(view).map(|node| node.frame)
    }

    pub fn opacity(&self, view: ViewId) -> Option<f32> {
        self.tree.borrow().get(view).map(|node| node.opacity)
    }

    pub fn decoration(&self, view: ViewId) -> Option<Decoration> {
        self.tree.borrow().get(view)?.decoration.clone()
    }

    pub fn label(&self, view: ViewId, slot: LabelSlot) -> Option<Label> {
        self.tree.borrow().get(view)?.labels.get(&slot).cloned()
    }

    pub fn gesture_count(&self, view: ViewId) -> usize {
        self.tree.borrow().gesture_count(view)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    pub fn is_alive(&self, view: ViewId) -> bool {
        self.tree.borrow().exists(view)
    }

    pub fn view_count(&self) -> usize {
        self.tree.borrow().node_count()
    }
}

impl ViewTree for HeadlessPlatform {
    fn create_view(&self) -> ViewId {
        self.tree.borrow_mut().create(Rect::ZERO)
    }

    fn destroy_view(&self, view: ViewId) {
        self.tree.borrow_mut().destroy(view);
    }

    fn attach(&self, container: ViewId, view: ViewId) -> Result<()> {
        self.tree.borrow_mut().attach(container, view)
    }

    fn detach(&self, view: ViewId) {
        self.tree.borrow_mut().detach(view);
    }

    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.tree.borrow().parent(view)
    }

    fn children(&self, container: ViewId) -> Vec<ViewId> {
        self.tree.borrow().children(container).to_vec()
    }

    fn bounds(&self, view: ViewId) -> Option<Size> {
        self.frame(view).map(|frame| frame.size)
    }

    fn set_frame(&self, view: ViewId, frame: Rect) {
        if let Some(node) = self.tree.borrow_mut().get_mut(view) {
            node.frame = frame;
        }
    }

    fn set_opacity(&self, view: ViewId, opacity: f32) {
        if let Some(node) = self.tree.borrow_mut().get_mut(view) {
            node.opacity = opacity;
        }
    }

    fn set_decoration(&self, view: ViewId, decoration: &Decoration) {
        if let Some(node) = self.tree.borrow_mut().get_mut(view) {
            node.decoration = Some(decoration.clone());
        }
    }

    fn set_label(&self, view: ViewId, slot: LabelSlot, label: &Label) {
        if let Some(node) = self.tree.borrow_mut().get_mut(view) {
            node.labels.insert(slot, label.clone());
        }
    }
}

impl Animator for HeadlessPlatform {
    fn animate_opacity(&self, view: ViewId, target: f32, duration: Duration, on_complete: Callback) {
        self.clock
            .borrow_mut()
            .push(duration, TaskKind::Animation { view, target }, on_complete);
    }
}

impl TextMeasurer for HeadlessPlatform {
    fn measure_with_options(
        &self,
        text: &str,
        font: &Font,
        options: &TextLayoutOptions,
    ) -> TextMetrics {
        self.measurer
            .borrow()
            .measure_with_options(text, font, options)
    }
}

impl GestureHost for HeadlessPlatform {
    fn add_tap(&self, view: ViewId, handler: TapHandler) -> GestureId {
        self.tree.borrow_mut().add_gesture(view, handler)
    }

    fn remove_gesture(&self, view: ViewId, gesture: GestureId) {
        self.tree.borrow_mut().remove_gesture(view, gesture);
    }
}

impl Scheduler for HeadlessPlatform {
    fn schedule(&self, delay: Duration, callback: Callback) -> TimerId {
        self.clock
            .borrow_mut()
            .push(delay, TaskKind::Deferred, callback)
    }

    fn cancel(&self, timer: TimerId) -> bool {
        self.clock.borrow_mut().cancel(timer)
    }
}

impl NotificationCenter for HeadlessPlatform {
    fn subscribe(&self, kind: EventKind, listener: EventListener) -> SubscriptionId {
        self.subscriptions
            .borrow_mut()
            .insert(Subscription { kind, listener })
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.subscriptions.borrow_mut().remove(subscription);
    }
}

impl PresentationChain for HeadlessPlatform {
    fn root_container(&self) -> Option<ViewId> {
        Some(self.root)
    }

    fn presented_over(&self, container: ViewId) -> Option<ViewId> {
        let presented = self.presented.borrow();
        let index = if container == self.root {
            0
        } else {
            presented.iter().position(|view| *view == container)? + 1
        };
        presented.get(index).copied()
    }
}

impl Platform for HeadlessPlatform {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn idiom(&self) -> DeviceIdiom {
        self.idiom
    }

    fn orientation(&self) -> Orientation {
        self.orientation.get()
    }
}
