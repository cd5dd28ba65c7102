//! Z-order (Morton) codes for pairs of real valued coordinates.
//!
//! Coordinates are quantized on a configurable number of bits per axis over
//! a configurable domain, and the quantized values are bit-interleaved into a
//! single integer that can be used as a sort key preserving spatial locality.
//!
//! ```
//! use morton::{Domain, Encoder, EncoderConfig};
//!
//! let encoder = Encoder::new(EncoderConfig::default().with_bits(8)).unwrap();
//! assert_eq!(encoder.encode(0.0, 0.0).unwrap(), 16383);
//! assert_eq!(morton::encode(180.0, 90.0, 8, Domain::GEOGRAPHIC).unwrap(), 65535);
//! ```

mod config;
mod encoder;
mod error;
mod morton;

pub use crate::config::*;
pub use crate::encoder::{encode, Encoder};
pub use crate::error::{Axis, MortonError};
pub use crate::morton::{deinterleave, interleave};
