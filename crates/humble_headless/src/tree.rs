//! In-memory view hierarchy

use humble_platform::{
    Decoration, GestureId, Label, LabelSlot, PlatformError, Rect, Result, TapHandler, ViewId,
};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

/// Stored state of a single view
#[derive(Clone, Default)]
pub struct ViewNode {
    pub frame: Rect,
    pub opacity: f32,
    pub decoration: Option<Decoration>,
    pub labels: FxHashMap<LabelSlot, Label>,
}

struct Gesture {
    view: ViewId,
    handler: TapHandler,
}

/// View storage with parent/child relationships and tap recognizers
pub struct ViewArena {
    nodes: SlotMap<ViewId, ViewNode>,
    /// Children back to front
    children: FxHashMap<ViewId, SmallVec<[ViewId; 8]>>,
    parents: FxHashMap<ViewId, ViewId>,
    gestures: SlotMap<GestureId, Gesture>,
}

impl Default for ViewArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewArena {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: FxHashMap::default(),
            parents: FxHashMap::default(),
            gestures: SlotMap::with_key(),
        }
    }

    /// Create a detached, fully opaque view
    pub fn create(&mut self, frame: Rect) -> ViewId {
        self.nodes.insert(ViewNode {
            frame,
            opacity: 1.0,
            ..Default::default()
        })
    }

    /// Destroy a view, its subtree and its gestures
    pub fn destroy(&mut self, view: ViewId) {
        if let Some(children) = self.children.remove(&view) {
            for child in children {
                self.parents.remove(&child);
                self.destroy(child);
            }
        }
        self.detach(view);
        self.gestures.retain(|_, gesture| gesture.view != view);
        self.nodes.remove(view);
    }

    pub fn exists(&self, view: ViewId) -> bool {
        self.nodes.contains_key(view)
    }

    pub fn get(&self, view: ViewId) -> Option<&ViewNode> {
        self.nodes.get(view)
    }

    pub fn get_mut(&mut self, view: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(view)
    }

    /// Make `view` the front-most child of `container`, moving it if needed
    pub fn attach(&mut self, container: ViewId, view: ViewId) -> Result<()> {
        for id in [container, view] {
            if !self.exists(id) {
                return Err(PlatformError::UnknownView(id));
            }
        }
        if self.is_ancestor_or_self(view, container) {
            return Err(PlatformError::InvalidHierarchy(format!(
                "cannot attach {view:?} inside its own subtree"
            )));
        }

        self.detach(view);
        self.children.entry(container).or_default().push(view);
        self.parents.insert(view, container);
        Ok(())
    }

    pub fn detach(&mut self, view: ViewId) {
        if let Some(parent) = self.parents.remove(&view) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|child| *child != view);
            }
        }
    }

    pub fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.parents.get(&view).copied()
    }

    pub fn children(&self, container: ViewId) -> &[ViewId] {
        self.children
            .get(&container)
            .map(|children| children.as_slice())
            .unwrap_or(&[])
    }

    fn is_ancestor_or_self(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn add_gesture(&mut self, view: ViewId, handler: TapHandler) -> GestureId {
        self.gestures.insert(Gesture { view, handler })
    }

    pub fn remove_gesture(&mut self, view: ViewId, gesture: GestureId) {
        if self.gestures.get(gesture).is_some_and(|g| g.view == view) {
            self.gestures.remove(gesture);
        }
    }

    /// Tap handlers attached to a view
    pub fn tap_handlers(&self, view: ViewId) -> Vec<TapHandler> {
        self.gestures
            .values()
            .filter(|gesture| gesture.view == view)
            .map(|gesture| gesture.handler.clone())
            .collect()
    }

    pub fn gesture_count(&self, view: ViewId) -> usize {
        self.gestures.values().filter(|g| g.view == view).count()
    }

    /// Live views, containers included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
