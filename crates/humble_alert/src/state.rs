//! Show/hide lifecycle state machine

/// Events driving the alert lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertEvent {
    /// `show` attached the alert and started the fade in
    Show,
    /// The fade in finished (or was interrupted)
    FadeInComplete,
    /// `hide` was requested by the timer, a tap or the caller
    Hide,
    /// The fade out finished, the alert is about to detach
    FadeOutComplete,
}

/// State machine for the alert lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AlertState {
    /// Not attached
    #[default]
    Hidden,
    /// Attached, fade in running
    Showing,
    /// Fully shown, auto-dismiss timer armed
    Visible,
    /// Fade out running
    Hiding,
}

impl AlertState {
    /// Handle an event and return the new state, or None if no transition
    pub fn on_event(&self, event: AlertEvent) -> Option<Self> {
        use AlertEvent::*;
        use AlertState::*;

        match (self, event) {
            (Hidden, Show) => Some(Showing),
            (Showing, FadeInComplete) => Some(Visible),
            // Interrupting the fade in is allowed
            (Showing, Hide) | (Visible, Hide) => Some(Hiding),
            (Hiding, FadeOutComplete) => Some(Hidden),
            _ => None,
        }
    }

    /// Check if the alert is attached to a container
    pub fn is_attached(&self) -> bool {
        !matches!(self, AlertState::Hidden)
    }

    /// Check if the alert is on screen or on its way there
    pub fn is_presenting(&self) -> bool {
        matches!(self, AlertState::Showing | AlertState::Visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut state = AlertState::Hidden;

        state = state.on_event(AlertEvent::Show).unwrap();
        assert_eq!(state, AlertState::Showing);

        state = state.on_event(AlertEvent::FadeInComplete).unwrap();
        assert_eq!(state, AlertState::Visible);

        state = state.on_event(AlertEvent::Hide).unwrap();
        assert_eq!(state, AlertState::Hiding);

        state = state.on_event(AlertEvent::FadeOutComplete).unwrap();
        assert_eq!(state, AlertState::Hidden);
    }

    #[test]
    fn test_hide_interrupts_showing() {
        let state = AlertState::Showing.on_event(AlertEvent::Hide);
        assert_eq!(state, Some(AlertState::Hiding));
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(AlertState::Hidden.on_event(AlertEvent::Hide), None);
        assert_eq!(AlertState::Hiding.on_event(AlertEvent::Hide), None);
        assert_eq!(AlertState::Visible.on_event(AlertEvent::Show), None);
        assert_eq!(AlertState::Hiding.on_event(AlertEvent::Show), None);
        // A late fade-in completion must not finish a fade out
        assert_eq!(AlertState::Hiding.on_event(AlertEvent::FadeInComplete), None);
        assert_eq!(AlertState::Visible.on_event(AlertEvent::FadeOutComplete), None);
    }

    #[test]
    fn test_predicates() {
        assert!(!AlertState::Hidden.is_attached());
        assert!(AlertState::Hiding.is_attached());
        assert!(AlertState::Showing.is_presenting());
        assert!(!AlertState::Hiding.is_presenting());
    }
}
