//! Decoding side of the transfer buffer
//!
//! [`Gamepads`] owns the buffer a consuming module reads from. Each [`Gamepads::poll`] asks a
//! [`Transport`] to refresh it and remembers the previous pressed bits so "just pressed" can be
//! answered without any state on the producer side.

use crate::bridge::Transport;
use crate::error::BridgeError;
use crate::host::DualRumble;
use crate::layout::{RecordView, BUFFER_SIZE, MAX_BUTTONS, MAX_GAMEPADS};
use tracing::debug;

/// Standard-layout buttons, numbered by their bit in the pressed-bits word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    /// Bottom button in right cluster
    ActionDown,
    /// Right button in right cluster
    ActionRight,
    /// Left button in right cluster
    ActionLeft,
    /// Top button in right cluster
    ActionUp,
    /// Top left front button
    FrontLeftUpper,
    /// Top right front button
    FrontRightUpper,
    /// Bottom left front button
    FrontLeftLower,
    /// Bottom right front button
    FrontRightLower,
    /// Select/back
    LeftCenterCluster,
    /// Start/forward
    RightCenterCluster,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    /// Center button in center cluster
    Mode,
}

impl Button {
    pub const ALL: [Button; MAX_BUTTONS] = [
        Self::ActionDown,
        Self::ActionRight,
        Self::ActionLeft,
        Self::ActionUp,
        Self::FrontLeftUpper,
        Self::FrontRightUpper,
        Self::FrontLeftLower,
        Self::FrontRightLower,
        Self::LeftCenterCluster,
        Self::RightCenterCluster,
        Self::LeftStick,
        Self::RightStick,
        Self::DPadUp,
        Self::DPadDown,
        Self::DPadLeft,
        Self::DPadRight,
        Self::Mode,
    ];

    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Slot index of a controller in the transfer buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GamepadId(u8);

impl GamepadId {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for GamepadId {
    fn from(slot: u8) -> Self {
        Self(slot)
    }
}

/// Decoded view of one connected controller
#[derive(Clone, Copy, Debug)]
pub struct Gamepad<'a> {
    id: GamepadId,
    record: RecordView<'a>,
    last_pressed_bits: u32,
}

impl<'a> Gamepad<'a> {
    pub fn id(&self) -> GamepadId {
        self.id
    }

    pub fn button_count(&self) -> u8 {
        self.record.button_count()
    }

    pub fn axis_count(&self) -> u8 {
        self.record.axis_count()
    }

    /// Left stick as (x, y), "up" positive
    pub fn left_stick(&self) -> (f32, f32) {
        (self.record.axis(0), self.record.axis(1))
    }

    pub fn left_stick_x(&self) -> f32 {
        self.record.axis(0)
    }

    pub fn left_stick_y(&self) -> f32 {
        self.record.axis(1)
    }

    /// Right stick as (x, y), "up" positive
    pub fn right_stick(&self) -> (f32, f32) {
        (self.record.axis(2), self.record.axis(3))
    }

    pub fn right_stick_x(&self) -> f32 {
        self.record.axis(2)
    }

    pub fn right_stick_y(&self) -> f32 {
        self.record.axis(3)
    }

    /// Left analog trigger in [0, 1]
    pub fn left_trigger(&self) -> f32 {
        self.record.axis(4)
    }

    /// Right analog trigger in [0, 1]
    pub fn right_trigger(&self) -> f32 {
        self.record.axis(5)
    }

    pub fn pressed_bits(&self) -> u32 {
        self.record.pressed_bits()
    }

    pub fn is_currently_pressed(&self, button: Button) -> bool {
        self.pressed_bits() & button.bit() != 0
    }

    /// Pressed now but not at the previous poll
    pub fn is_just_pressed(&self, button: Button) -> bool {
        self.is_currently_pressed(button) && self.last_pressed_bits & button.bit() == 0
    }

    pub fn all_currently_pressed(&self) -> impl Iterator<Item = Button> + 'a {
        let gamepad = *self;
        Button::ALL
            .into_iter()
            .filter(move |&button| gamepad.is_currently_pressed(button))
    }

    pub fn all_just_pressed(&self) -> impl Iterator<Item = Button> + 'a {
        let gamepad = *self;
        Button::ALL
            .into_iter()
            .filter(move |&button| gamepad.is_just_pressed(button))
    }
}

/// Owner of the transfer buffer and the transport that fills it
pub struct Gamepads<T: Transport> {
    transport: T,
    buffer: Vec<u8>,
    last_pressed_bits: [u32; MAX_GAMEPADS],
}

impl<T: Transport> Gamepads<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            // Zeroed so slots the producer never writes read as disconnected
            buffer: vec![0; BUFFER_SIZE],
            last_pressed_bits: [0; MAX_GAMEPADS],
        }
    }

    /// Refresh the buffer. Call once per frame.
    pub fn poll(&mut self) -> Result<(), BridgeError> {
        let mut previous = [0; MAX_GAMEPADS];
        for (slot, last) in previous.iter_mut().enumerate() {
            *last = RecordView::from_region(&self.buffer, slot)
                .filter(RecordView::connected)
                .map_or(0, |record| record.pressed_bits());
        }
        // History only moves on together with the buffer.
        self.transport.fill(&mut self.buffer, 0)?;
        self.last_pressed_bits = previous;
        debug!("Polled gamepads, {} connected", self.all().count());
        Ok(())
    }

    /// Controller in slot `id`, if connected
    pub fn get(&self, id: GamepadId) -> Option<Gamepad<'_>> {
        self.slot(id.0 as usize)
    }

    /// All connected controllers in slot order
    pub fn all(&self) -> impl Iterator<Item = Gamepad<'_>> + '_ {
        (0..MAX_GAMEPADS).filter_map(move |slot| self.slot(slot))
    }

    /// Play a dual-rumble effect; unknown ids and pads without haptics are ignored
    pub fn rumble(
        &mut self,
        id: GamepadId,
        duration_ms: u32,
        start_delay_ms: u32,
        strong_magnitude: f32,
        weak_magnitude: f32,
    ) {
        self.transport.play_effect(
            id.0,
            DualRumble {
                duration_ms,
                start_delay_ms,
                strong_magnitude,
                weak_magnitude,
            },
        );
    }

    /// Raw transfer buffer, as a compiled consumer would see it
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn slot(&self, slot: usize) -> Option<Gamepad<'_>> {
        let record = RecordView::from_region(&self.buffer, slot)?;
        record.connected().then(|| Gamepad {
            id: GamepadId(slot as u8),
            record,
            last_pressed_bits: self.last_pressed_bits[slot],
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub type NativeGamepads =
    Gamepads<crate::bridge::Bridge<crate::host::gilrs_host::GilrsHost<crate::host::gilrs_host::Polling>>>;

#[cfg(not(target_arch = "wasm32"))]
impl NativeGamepads {
    /// Gamepads sampled through gilrs
    pub fn native(settings: crate::config::BridgeSettings) -> Result<Self, BridgeError> {
        let host = crate::host::gilrs_host::GilrsHost::create()?.initialize();
        Ok(Self::new(crate::bridge::Bridge::new(host, settings)?))
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl Gamepads<crate::bridge::Bridge<crate::host::web::WebHost>> {
    /// Gamepads sampled from `navigator.getGamepads()` inside this module
    pub fn web(settings: crate::config::BridgeSettings) -> Result<Self, BridgeError> {
        let host = crate::host::web::WebHost::new()?;
        Ok(Self::new(crate::bridge::Bridge::new(host, settings)?))
    }
}

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
impl Gamepads<crate::bridge::imported::ImportedHost> {
    /// Gamepads filled by the embedding page through module imports
    pub fn imported() -> Self {
        Self::new(crate::bridge::imported::ImportedHost)
    }
}
