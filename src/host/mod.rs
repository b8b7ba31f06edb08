//! Host device query interface
//!
//! The bridge never talks to a device API directly. Each environment provides a
//! [`GamepadSource`] that hands out a snapshot of its controller list and accepts haptic
//! requests:
//!
//! ```text
//! navigator.getGamepads() ──► WebHost ───┐
//! gilrs                    ──► GilrsHost ─┼──► GamepadSource ──► Encoder / Effect Dispatcher
//! prepared snapshots       ──► ScriptedHost┘
//! ```
//!
//! Snapshots are taken in the host's own units: buttons in the W3C standard order, axes in
//! [-1, 1] with "down" and "right" positive, triggers resting at -1.

pub mod scripted;

#[cfg(not(target_arch = "wasm32"))]
pub mod gilrs_host;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use scripted::ScriptedHost;

use crate::error::BridgeError;

/// Button/axis layout a controller reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingType {
    /// The host guarantees the standard gamepad layout
    Standard,
    /// Unknown or vendor layout; never encoded
    NonStandard,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HostButton {
    pub pressed: bool,
    /// Analog value in [0, 1]; not part of the wire record
    pub value: f32,
}

impl HostButton {
    pub fn new(pressed: bool) -> Self {
        Self {
            pressed,
            value: if pressed { 1.0 } else { 0.0 },
        }
    }
}

/// One controller as reported by the host for a single poll
#[derive(Clone, Debug, PartialEq)]
pub struct HostGamepad {
    /// Host-assigned controller index
    pub index: u32,
    pub connected: bool,
    pub mapping: MappingType,
    pub buttons: Vec<HostButton>,
    pub axes: Vec<f32>,
    /// Whether a haptic actuator is exposed
    pub haptics: bool,
}

impl HostGamepad {
    /// A connected, standard-mapped controller with nothing pressed and sticks centered
    pub fn standard(index: u32) -> Self {
        Self {
            index,
            connected: true,
            mapping: MappingType::Standard,
            buttons: vec![HostButton::default(); crate::layout::MAX_BUTTONS],
            axes: vec![0.0, 0.0, 0.0, 0.0, -1.0, -1.0],
            haptics: false,
        }
    }

    /// Whether the encoder will produce a valid record for this controller
    pub fn is_encodable(&self) -> bool {
        self.connected && self.mapping == MappingType::Standard
    }
}

/// Parameters of a "dual-rumble" haptic effect
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DualRumble {
    pub duration_ms: u32,
    pub start_delay_ms: u32,
    /// Low-frequency motor, expected in [0, 1]
    pub strong_magnitude: f32,
    /// High-frequency motor, expected in [0, 1]
    pub weak_magnitude: f32,
}

/// A live source of controller state
pub trait GamepadSource {
    /// Current controller list in host order. `None` marks an empty host position.
    fn gamepads(&mut self) -> Vec<Option<HostGamepad>>;

    /// Controller with host index `index`, if present.
    ///
    /// Used for effect dispatch, which happens out of band from polling. Sources that advance on
    /// every [`GamepadSource::gamepads`] call must override this to look without advancing.
    fn gamepad(&mut self, index: u32) -> Option<HostGamepad> {
        self.gamepads()
            .into_iter()
            .flatten()
            .find(|gamepad| gamepad.index == index)
    }

    /// Ask the controller with host index `index` to play `effect`.
    ///
    /// Must not block on effect completion. Only called for controllers whose snapshot
    /// reported `haptics`.
    fn play_dual_rumble(&mut self, index: u32, effect: &DualRumble) -> Result<(), BridgeError>;
}

impl<S: GamepadSource + ?Sized> GamepadSource for Box<S> {
    fn gamepads(&mut self) -> Vec<Option<HostGamepad>> {
        (**self).gamepads()
    }

    fn gamepad(&mut self, index: u32) -> Option<HostGamepad> {
        (**self).gamepad(index)
    }

    fn play_dual_rumble(&mut self, index: u32, effect: &DualRumble) -> Result<(), BridgeError> {
        (**self).play_dual_rumble(index, effect)
    }
}
