//! Host events delivered through the notification center

/// Interface orientation reported by the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Orientation could not be determined
    Unknown,
    /// Device upright
    #[default]
    Portrait,
    /// Device upside down
    PortraitUpsideDown,
    /// Device rotated with the home edge on the left
    LandscapeLeft,
    /// Device rotated with the home edge on the right
    LandscapeRight,
}

impl Orientation {
    /// Check if the orientation is one of the landscape variants
    pub fn is_landscape(&self) -> bool {
        matches!(self, Orientation::LandscapeLeft | Orientation::LandscapeRight)
    }

    /// Check if the orientation is one of the portrait variants
    pub fn is_portrait(&self) -> bool {
        matches!(self, Orientation::Portrait | Orientation::PortraitUpsideDown)
    }
}

/// Events the host broadcasts to interested views
#[derive(Clone, Debug, PartialEq)]
pub enum PlatformEvent {
    /// The software keyboard is about to appear
    KeyboardWillShow {
        /// Keyboard height in logical pixels
        height: f32,
    },
    /// The software keyboard is about to disappear
    KeyboardWillHide,
    /// The interface orientation changed
    OrientationChanged(Orientation),
}

impl PlatformEvent {
    /// The subscription channel this event is delivered on
    pub fn kind(&self) -> EventKind {
        match self {
            PlatformEvent::KeyboardWillShow { .. } => EventKind::KeyboardWillShow,
            PlatformEvent::KeyboardWillHide => EventKind::KeyboardWillHide,
            PlatformEvent::OrientationChanged(_) => EventKind::OrientationChanged,
        }
    }
}

/// Subscription channels offered by the notification center
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyboardWillShow,
    KeyboardWillHide,
    OrientationChanged,
}

impl EventKind {
    /// Every channel, in a stable order
    pub const ALL: [EventKind; 3] = [
        EventKind::KeyboardWillShow,
        EventKind::KeyboardWillHide,
        EventKind::OrientationChanged,
    ];
}
