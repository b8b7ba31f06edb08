//! Error types for the gamepad bridge

/// Errors surfaced by the bridge and its host backends
///
/// Host anomalies (missing controllers, unsupported mappings, missing actuators) are never
/// errors; they are handled by omission. What remains are caller contract breaches and
/// backend or configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The destination region cannot hold all slots past the requested offset
    ///
    /// Reported before any byte is written.
    #[error("Destination region too small: need {required} bytes, have {available}")]
    BufferTooSmall { required: usize, available: usize },

    /// `offset + buffer size` does not fit in the address space
    #[error("Destination offset {0} overflows the address space")]
    OffsetOverflow(usize),

    /// The host backend could not be brought up
    #[error("Failed to initialize host backend: {0}")]
    InitializationError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    /// The host refused or failed to queue a haptic effect
    #[error("Haptic effect rejected: {0}")]
    EffectError(String),
}
