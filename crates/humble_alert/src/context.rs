//! Shared alert context
//!
//! An [`AlertContext`] is created once per window. It owns the platform
//! handle, the configuration, the container resolver used by
//! [`AlertView::show`](crate::AlertView::show) and the registry of attached
//! alerts. The registry keeps an alert alive while it is on screen, and lets a
//! new alert find the ones it has to replace.

use std::cell::RefCell;
use std::rc::Rc;

use humble_platform::{Platform, PresentationChain, ViewId};
use rustc_hash::FxHashMap;

use crate::alert::AlertView;
use crate::config::AlertConfig;

/// Picks the container `show()` presents into
pub type ContainerResolver = Box<dyn Fn(&dyn Platform) -> Option<ViewId>>;

/// Walk the presentation chain from the root to the frontmost screen
pub fn frontmost_container<P: PresentationChain + ?Sized>(chain: &P) -> Option<ViewId> {
    let mut container = chain.root_container()?;
    while let Some(next) = chain.presented_over(container) {
        container = next;
    }
    Some(container)
}

/// Platform, configuration and attached-alert registry shared by all alerts
pub struct AlertContext {
    platform: Rc<dyn Platform>,
    config: AlertConfig,
    resolver: RefCell<ContainerResolver>,
    attached: RefCell<FxHashMap<ViewId, AlertView>>,
}

impl AlertContext {
    /// Create a context with the default configuration
    pub fn new(platform: Rc<dyn Platform>) -> Rc<Self> {
        Self::with_config(platform, AlertConfig::default())
    }

    /// Create a context with a custom configuration
    pub fn with_config(platform: Rc<dyn Platform>, config: AlertConfig) -> Rc<Self> {
        tracing::debug!("AlertContext created for {} platform", platform.name());
        Rc::new(Self {
            platform,
            config,
            resolver: RefCell::new(Box::new(|platform: &dyn Platform| {
                frontmost_container(platform)
            })),
            attached: RefCell::new(FxHashMap::default()),
        })
    }

    /// Replace the container resolver used by `show()`
    pub fn set_resolver(&self, resolver: impl Fn(&dyn Platform) -> Option<ViewId> + 'static) {
        *self.resolver.borrow_mut() = Box::new(resolver);
    }

    /// Resolve the container `show()` presents into
    pub fn frontmost_container(&self) -> Option<ViewId> {
        let resolver = self.resolver.borrow();
        resolver(&*self.platform)
    }

    pub fn platform(&self) -> &Rc<dyn Platform> {
        &self.platform
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Attached alert owning a platform view
    pub fn alert_for(&self, view: ViewId) -> Option<AlertView> {
        self.attached.borrow().get(&view).cloned()
    }

    /// Attached alerts among the direct children of `container`
    pub fn alerts_in(&self, container: ViewId) -> Vec<AlertView> {
        let children = self.platform.children(container);
        let attached = self.attached.borrow();
        children
            .iter()
            .filter_map(|child| attached.get(child).cloned())
            .collect()
    }

    /// Number of alerts currently attached anywhere
    pub fn attached_count(&self) -> usize {
        self.attached.borrow().len()
    }

    pub(crate) fn retain(&self, alert: &AlertView) {
        self.attached
            .borrow_mut()
            .insert(alert.view_id(), alert.clone());
    }

    pub(crate) fn release(&self, view: ViewId) {
        // The released handle may be the last one; drop it after the borrow ends
        let removed = self.attached.borrow_mut().remove(&view);
        drop(removed);
    }
}

impl std::fmt::Debug for AlertContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertContext")
            .field("platform", &self.platform.name())
            .field("config", &self.config)
            .field("attached", &self.attached.borrow().len())
            .finish()
    }
}
