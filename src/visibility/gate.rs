use crate::{foundation::core::Geometry, render::scheduler::AnimationState};

/// Host's page-level scroll event channel.
pub trait ScrollChannel {
    /// Start delivering scroll events to the player.
    fn subscribe(&mut self);

    /// Stop delivering scroll events to the player.
    fn unsubscribe(&mut self);
}

/// Effect of one intersection notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateTransition {
    /// The gate is not armed; the notification was dropped.
    Ignored,
    /// Scroll events were subscribed.
    Subscribed,
    /// Scroll events were unsubscribed.
    Unsubscribed,
    /// Already in the requested state.
    Unchanged,
}

/// Zero-threshold intersection test: any overlap with the viewport counts.
pub fn intersects(geometry: &Geometry) -> bool {
    geometry.is_available() && !geometry.is_offscreen()
}

/// Subscribes scroll handling only while the render surface intersects the viewport.
///
/// The subscription flag lives in [`AnimationState::is_listening`]; the gate issues at most one
/// subscribe or unsubscribe per visibility transition.
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityGate {
    armed: bool,
    debug: bool,
}

impl VisibilityGate {
    /// An unarmed gate; `debug` enables the human-readable subscription log.
    pub fn new(debug: bool) -> Self {
        Self {
            armed: false,
            debug,
        }
    }

    /// Start reacting to intersection notifications.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Whether notifications are being acted on.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Handle an intersection notification for the render surface.
    pub fn observe<C>(
        &self,
        state: &mut AnimationState,
        intersecting: bool,
        channel: &mut C,
    ) -> GateTransition
    where
        C: ScrollChannel + ?Sized,
    {
        if !self.armed {
            return GateTransition::Ignored;
        }
        match (intersecting, state.listening) {
            (true, false) => {
                channel.subscribe();
                state.listening = true;
                if self.debug {
                    tracing::info!("now listening for scroll events");
                }
                GateTransition::Subscribed
            }
            (false, true) => {
                channel.unsubscribe();
                state.listening = false;
                if self.debug {
                    tracing::info!("stopped listening for scroll events");
                }
                GateTransition::Unsubscribed
            }
            _ => GateTransition::Unchanged,
        }
    }

    /// Stop observing and drop any live subscription.
    pub fn disarm<C>(&mut self, state: &mut AnimationState, channel: &mut C)
    where
        C: ScrollChannel + ?Sized,
    {
        if state.listening {
            channel.unsubscribe();
            state.listening = false;
        }
        self.armed = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/gate.rs"]
mod tests;
