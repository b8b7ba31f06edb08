//! Desktop host backed by gilrs
//!
//! gilrs reports controllers by opaque id and updates their cached state only while its event
//! queue is drained, so every snapshot first pumps the queue. Controllers are given stable
//! slots in the order they are first seen; a pad that reconnects keeps its slot.

use super::{DualRumble, GamepadSource, HostButton, HostGamepad, MappingType};
use crate::error::BridgeError;
use crate::layout::MAX_GAMEPADS;
use chrono::{DateTime, Duration, Local};
use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Repeat, Replay, Ticks};
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs, MappingSource};
use statum::{machine, state};
use tracing::{debug, error, info, warn};

/// gilrs buttons in standard-layout order; position == bit in the pressed-bits word
const STANDARD_BUTTONS: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

struct PlayingEffect {
    _effect: Effect,
    until: DateTime<Local>,
}

// gilrs effects carry no Debug impl
impl std::fmt::Debug for PlayingEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayingEffect")
            .field("until", &self.until)
            .finish_non_exhaustive()
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum HostState {
    Initializing,
    Polling,
}

#[machine]
#[derive(Debug)]
pub struct GilrsHost<S: HostState> {
    gilrs: Gilrs,

    // gilrs id per slot, in first-seen order
    slots: [Option<GamepadId>; MAX_GAMEPADS],

    // Effects stop playing when dropped, so hold them until their window has passed
    playing: Vec<PlayingEffect>,
}

// Methods available in all states
impl<S: HostState> GilrsHost<S> {
    fn slot_of(&self, id: GamepadId) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(id))
    }

    fn find_or_insert(&mut self, id: GamepadId) -> Option<usize> {
        if let Some(slot) = self.slot_of(id) {
            return Some(slot);
        }
        let free = self.slots.iter().position(Option::is_none)?;
        self.slots[free] = Some(id);
        info!(
            "Registered gamepad {} ({}) in slot {}",
            id,
            self.gilrs.gamepad(id).name(),
            free
        );
        Some(free)
    }

    /// Number of slots handed out so far
    pub fn registered(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl GilrsHost<Initializing> {
    pub fn create() -> Result<Self, BridgeError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(BridgeError::InitializationError(e.to_string()));
            }
        };

        Ok(Self::new(gilrs, [None; MAX_GAMEPADS], Vec::new()))
    }

    /// Register every controller gilrs already knows about, then start polling
    pub fn initialize(mut self) -> GilrsHost<Polling> {
        let known: Vec<GamepadId> = self.gilrs.gamepads().map(|(id, _)| id).collect();
        if known.is_empty() {
            warn!("No gamepad connected, slots will be assigned on connection");
        } else {
            info!("Found {} gamepads", known.len());
        }
        for id in known {
            if self.find_or_insert(id).is_none() {
                warn!("All {} slots taken, ignoring gamepad {}", MAX_GAMEPADS, id);
            }
        }

        info!("gilrs host initialized, transitioning to Polling state");
        self.transition()
    }
}

impl GilrsHost<Polling> {
    fn pump_events(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!("Controller {} connected", id);
                    if self.find_or_insert(id).is_none() {
                        warn!("All {} slots taken, ignoring gamepad {}", MAX_GAMEPADS, id);
                    }
                }
                EventType::Disconnected => {
                    warn!("Controller {} disconnected", id);
                }
                _ => {}
            }
        }
    }

    fn purge_finished_effects(&mut self) {
        let now = Local::now();
        self.playing.retain(|playing| playing.until >= now);
    }
}

/// Convert gilrs readings into the host axis list.
///
/// gilrs reports "up" as positive; the host convention is "down" positive. Analog triggers come
/// as 0..1 buttons and rest at -1 in the host convention.
fn host_axes(left: (f32, f32), right: (f32, f32), triggers: (f32, f32)) -> Vec<f32> {
    vec![
        left.0,
        -left.1,
        right.0,
        -right.1,
        triggers.0.mul_add(2.0, -1.0),
        triggers.1.mul_add(2.0, -1.0),
    ]
}

fn snapshot(index: u32, gamepad: Gamepad<'_>) -> HostGamepad {
    let mapping = if matches!(gamepad.mapping_source(), MappingSource::None) {
        MappingType::NonStandard
    } else {
        MappingType::Standard
    };

    let buttons = STANDARD_BUTTONS
        .iter()
        .map(|&button| HostButton {
            pressed: gamepad.is_pressed(button),
            value: gamepad
                .button_data(button)
                .map(|data| data.value())
                .unwrap_or_default(),
        })
        .collect();

    let trigger = |button: Button| {
        gamepad
            .button_data(button)
            .map(|data| data.value())
            .unwrap_or_default()
    };
    let axes = host_axes(
        (gamepad.value(Axis::LeftStickX), gamepad.value(Axis::LeftStickY)),
        (gamepad.value(Axis::RightStickX), gamepad.value(Axis::RightStickY)),
        (trigger(Button::LeftTrigger2), trigger(Button::RightTrigger2)),
    );

    HostGamepad {
        index,
        connected: gamepad.is_connected(),
        mapping,
        buttons,
        axes,
        haptics: gamepad.is_ff_supported(),
    }
}

fn magnitude(value: f32) -> u16 {
    (f32::from(u16::MAX) * value.clamp(0.0, 1.0)).round() as u16
}

impl GamepadSource for GilrsHost<Polling> {
    fn gamepads(&mut self) -> Vec<Option<HostGamepad>> {
        self.pump_events();

        let used = self
            .slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        self.slots[..used]
            .iter()
            .enumerate()
            .map(|(slot, id)| id.map(|id| snapshot(slot as u32, self.gilrs.gamepad(id))))
            .collect()
    }

    fn play_dual_rumble(&mut self, index: u32, effect: &DualRumble) -> Result<(), BridgeError> {
        self.purge_finished_effects();

        let id = self
            .slots
            .get(index as usize)
            .copied()
            .flatten()
            .ok_or_else(|| BridgeError::EffectError(format!("no gamepad in slot {}", index)))?;

        let play_for = Ticks::from_ms(effect.duration_ms);
        let after = Ticks::from_ms(effect.start_delay_ms);
        let scheduling = Replay {
            play_for,
            after,
            ..Default::default()
        };

        let built = EffectBuilder::new()
            .add_effect(BaseEffect {
                kind: BaseEffectType::Strong {
                    magnitude: magnitude(effect.strong_magnitude),
                },
                scheduling,
                ..Default::default()
            })
            .add_effect(BaseEffect {
                kind: BaseEffectType::Weak {
                    magnitude: magnitude(effect.weak_magnitude),
                },
                scheduling,
                ..Default::default()
            })
            .repeat(Repeat::For(play_for + after))
            .gamepads(&[id])
            .finish(&mut self.gilrs)
            .map_err(|e| BridgeError::EffectError(e.to_string()))?;

        built
            .play()
            .map_err(|e| BridgeError::EffectError(e.to_string()))?;

        let until = Local::now()
            + Duration::milliseconds(i64::from(effect.duration_ms) + i64::from(effect.start_delay_ms));
        debug!("Dual-rumble playing on slot {} until {}", index, until.format("%H:%M:%S.%3f"));
        self.playing.push(PlayingEffect {
            _effect: built,
            until,
        });
        Ok(())
    }
}
