//! Gamepad state bridge for sandboxed modules
//!
//! Samples connected controllers once per poll, normalizes sticks and triggers, and packs the
//! result into a flat buffer of fixed 36-byte records (see [`layout`]) that a compiled module can
//! read without any parsing logic. Haptic "dual-rumble" requests travel the other way.
//!
//! # Architecture
//!
//! ```text
//! host (gilrs | navigator.getGamepads | scripted)
//!     │ GamepadSource
//!     ▼
//! Bridge ──encode──► transfer buffer ──► Gamepads (decoded views)
//!     ▲                                      │
//!     └──────────── play_effect ◄────────────┘
//! ```
//!
//! ```rust
//! use padbridge::bridge::Bridge;
//! use padbridge::config::BridgeSettings;
//! use padbridge::consumer::{Button, Gamepads};
//! use padbridge::host::{HostButton, HostGamepad, ScriptedHost};
//!
//! let mut pad = HostGamepad::standard(0);
//! pad.buttons[0] = HostButton::new(true);
//! pad.axes[0] = 0.5;
//!
//! let bridge = Bridge::new(ScriptedHost::new(vec![Some(pad)]), BridgeSettings::default())?;
//! let mut gamepads = Gamepads::new(bridge);
//! gamepads.poll()?;
//!
//! let first = gamepads.all().next().unwrap();
//! assert!(first.is_currently_pressed(Button::ActionDown));
//! assert!(first.left_stick_x() > 0.4);
//! # Ok::<(), padbridge::error::BridgeError>(())
//! ```

pub mod bridge;
pub mod config;
pub mod consumer;
pub mod error;
pub mod host;
pub mod layout;

pub use bridge::{Bridge, Encoder, Transport};
pub use config::BridgeSettings;
pub use consumer::{Button, Gamepad, GamepadId, Gamepads};
pub use error::BridgeError;

/// Crate version packed as `major << 24 | minor << 16 | patch`, for loaders that check
/// compatibility with the module they are about to feed.
pub fn crate_version() -> u32 {
    let part = |value: &str| value.parse::<u32>().unwrap_or(0);
    let major = part(env!("CARGO_PKG_VERSION_MAJOR"));
    let minor = part(env!("CARGO_PKG_VERSION_MINOR"));
    let patch = part(env!("CARGO_PKG_VERSION_PATCH"));
    (major << 24) + (minor << 16) + patch
}

#[cfg(target_arch = "wasm32")]
#[no_mangle]
pub extern "C" fn padbridge_crate_version() -> u32 {
    crate_version()
}
