//! In-memory host that replays prepared controller snapshots

use super::{DualRumble, GamepadSource, HostGamepad};
use crate::error::BridgeError;
use std::collections::VecDeque;
use tracing::debug;

/// A [`GamepadSource`] fed by hand
///
/// Frames pushed with [`ScriptedHost::push_frame`] are consumed one per poll; once the queue is
/// empty the last frame keeps being reported. Effect dispatch never advances the queue.
/// Dispatched effects are recorded.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    current: Vec<Option<HostGamepad>>,
    pending: VecDeque<Vec<Option<HostGamepad>>>,
    effects: Vec<(u32, DualRumble)>,
    reject_effects: bool,
}

impl ScriptedHost {
    pub fn new(frame: Vec<Option<HostGamepad>>) -> Self {
        Self {
            current: frame,
            ..Default::default()
        }
    }

    /// Queue a frame to be reported by a later poll
    pub fn push_frame(&mut self, frame: Vec<Option<HostGamepad>>) {
        self.pending.push_back(frame);
    }

    /// Replace the frame reported from now on and drop anything queued
    pub fn set_frame(&mut self, frame: Vec<Option<HostGamepad>>) {
        self.pending.clear();
        self.current = frame;
    }

    /// Make every effect request fail, as a host without a working actuator would
    pub fn reject_effects(&mut self, reject: bool) {
        self.reject_effects = reject;
    }

    /// Effects accepted so far, by host index
    pub fn effects(&self) -> &[(u32, DualRumble)] {
        &self.effects
    }
}

impl GamepadSource for ScriptedHost {
    fn gamepads(&mut self) -> Vec<Option<HostGamepad>> {
        if let Some(next) = self.pending.pop_front() {
            self.current = next;
        }
        self.current.clone()
    }

    // Looks at the frame last polled; queued frames stay queued.
    fn gamepad(&mut self, index: u32) -> Option<HostGamepad> {
        self.current
            .iter()
            .flatten()
            .find(|gamepad| gamepad.index == index)
            .cloned()
    }

    fn play_dual_rumble(&mut self, index: u32, effect: &DualRumble) -> Result<(), BridgeError> {
        if self.reject_effects {
            return Err(BridgeError::EffectError(format!(
                "scripted host rejects effects (pad {})",
                index
            )));
        }
        debug!("Scripted host recorded effect for pad {}: {:?}", index, effect);
        self.effects.push((index, *effect));
        Ok(())
    }
}
