//! The gamepad bridge
//!
//! Two operations make up the whole surface:
//!
//! 1. [`Bridge::encode`] - sample the host once and pack every slot into caller memory
//! 2. [`Bridge::play_effect`] - fire a dual-rumble effect, out of band from polling
//!
//! ```text
//! GamepadSource ──► normalize ──► Encoder ──► caller memory [8 x 36 bytes]
//!       ▲
//!       └──── play_effect (dual-rumble)
//! ```
//!
//! A consuming module either owns a [`Bridge`] directly (wrapped variant) or has the host
//! environment fill its memory through the raw imports in [`imported`].

pub mod effects;
pub mod encoder;
pub mod normalize;

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub mod imported;

pub use encoder::Encoder;

use crate::config::BridgeSettings;
use crate::error::BridgeError;
use crate::host::{DualRumble, GamepadSource};
use tracing::info;

/// Something that can fill the transfer buffer and forward haptic requests
pub trait Transport {
    /// Refresh `memory[offset..offset + BUFFER_SIZE]` with the current controller state
    fn fill(&mut self, memory: &mut [u8], offset: usize) -> Result<(), BridgeError>;

    fn play_effect(&mut self, gamepad_id: u8, effect: DualRumble);
}

/// A host source paired with an encoder
pub struct Bridge<S: GamepadSource> {
    source: S,
    encoder: Encoder,
}

impl<S: GamepadSource> Bridge<S> {
    pub fn new(source: S, settings: BridgeSettings) -> Result<Self, BridgeError> {
        settings.validate()?;
        info!("Initializing gamepad bridge with settings: {:?}", settings);
        Ok(Self {
            source,
            encoder: Encoder::new(settings),
        })
    }

    /// Sample every controller once and write the slots at `offset`
    pub fn encode(&mut self, memory: &mut [u8], offset: usize) -> Result<(), BridgeError> {
        let gamepads = self.source.gamepads();
        self.encoder.encode(&gamepads, memory, offset)
    }

    pub fn play_effect(
        &mut self,
        gamepad_id: u8,
        duration_ms: u32,
        start_delay_ms: u32,
        strong_magnitude: f32,
        weak_magnitude: f32,
    ) {
        effects::play_effect(
            &mut self.source,
            gamepad_id,
            DualRumble {
                duration_ms,
                start_delay_ms,
                strong_magnitude,
                weak_magnitude,
            },
        );
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn settings(&self) -> &BridgeSettings {
        self.encoder.settings()
    }
}

impl<S: GamepadSource> Transport for Bridge<S> {
    fn fill(&mut self, memory: &mut [u8], offset: usize) -> Result<(), BridgeError> {
        self.encode(memory, offset)
    }

    fn play_effect(&mut self, gamepad_id: u8, effect: DualRumble) {
        effects::play_effect(&mut self.source, gamepad_id, effect);
    }
}
