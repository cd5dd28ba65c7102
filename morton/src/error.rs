use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MortonError {
    /// A coordinate (or a code, when decoding) that the encoder refuses.
    #[error("invalid {axis} coordinate {value}: {reason}")]
    InvalidInput {
        axis: Axis,
        value: f64,
        reason: String,
    },
    /// A code handed to the decoder that no coordinate pair maps to.
    #[error("code {code} does not fit in {bits} bits")]
    InvalidCode { code: u64, bits: u32 },
    /// The encoder itself is misconfigured. Fatal for a whole run.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl MortonError {
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::InvalidConfiguration(_) => true,
            _ => false,
        }
    }

    /// Per-record failures: the caller may skip the record and go on.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::InvalidInput { .. } | Self::InvalidCode { .. } => true,
            Self::InvalidConfiguration(_) => false,
        }
    }
}
