use crate::error::MortonError;
use serde_derive::{Deserialize, Serialize};

/// The largest number of bits per axis such that the combined code fits in a `u64`.
pub const MAX_BITS_PER_AXIS: u32 = 32;

pub const DEFAULT_BITS_PER_AXIS: u32 = 32;

/// Inclusive bounds of the coordinate space that gets quantized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Domain {
    /// Longitude on `x`, latitude on `y`.
    pub const GEOGRAPHIC: Domain = Domain {
        xmin: -180.0,
        xmax: 180.0,
        ymin: -90.0,
        ymax: 90.0,
    };

    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    pub fn validate(&self) -> Result<(), MortonError> {
        let bounds = [
            ("xmin", self.xmin),
            ("xmax", self.xmax),
            ("ymin", self.ymin),
            ("ymax", self.ymax),
        ];
        for (name, value) in bounds.iter() {
            if !value.is_finite() {
                return Err(MortonError::InvalidConfiguration(format!(
                    "domain bound {} is not finite ({})",
                    name, value
                )));
            }
        }
        if !(self.xmin < self.xmax) {
            return Err(MortonError::InvalidConfiguration(format!(
                "empty x range [{}, {}]",
                self.xmin, self.xmax
            )));
        }
        if !(self.ymin < self.ymax) {
            return Err(MortonError::InvalidConfiguration(format!(
                "empty y range [{}, {}]",
                self.ymin, self.ymax
            )));
        }
        if !(self.xmax - self.xmin).is_finite() || !(self.ymax - self.ymin).is_finite() {
            return Err(MortonError::InvalidConfiguration(
                "domain span overflows a double".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::GEOGRAPHIC
    }
}

/// Which axis takes the odd (more significant) bit of each pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrder {
    /// `y` on even positions, `x` on odd ones.
    XMajor,
    /// `x` on even positions, `y` on odd ones.
    YMajor,
}

impl Default for AxisOrder {
    fn default() -> Self {
        Self::XMajor
    }
}

/// What to do with finite coordinates that fall outside the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePolicy {
    Reject,
    Clamp,
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self::Reject
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub bits_per_axis: u32,
    pub domain: Domain,
    pub order: AxisOrder,
    pub policy: RangePolicy,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            bits_per_axis: DEFAULT_BITS_PER_AXIS,
            domain: Domain::default(),
            order: AxisOrder::default(),
            policy: RangePolicy::default(),
        }
    }
}

impl EncoderConfig {
    pub fn with_bits(self, bits_per_axis: u32) -> Self {
        Self {
            bits_per_axis,
            ..self
        }
    }

    pub fn with_domain(self, domain: Domain) -> Self {
        Self { domain, ..self }
    }

    pub fn with_order(self, order: AxisOrder) -> Self {
        Self { order, ..self }
    }

    pub fn with_policy(self, policy: RangePolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn validate(&self) -> Result<(), MortonError> {
        if self.bits_per_axis == 0 || self.bits_per_axis > MAX_BITS_PER_AXIS {
            return Err(MortonError::InvalidConfiguration(format!(
                "bits per axis should be between 1 and {}, got {} instead",
                MAX_BITS_PER_AXIS, self.bits_per_axis
            )));
        }
        self.domain.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(EncoderConfig::default().validate().is_ok());
        assert_eq!(EncoderConfig::default().domain, Domain::GEOGRAPHIC);
    }

    #[test]
    fn bits_bounds() {
        let config = EncoderConfig::default();
        assert!(config.with_bits(0).validate().unwrap_err().is_configuration());
        assert!(config.with_bits(33).validate().unwrap_err().is_configuration());
        assert!(config.with_bits(1).validate().is_ok());
        assert!(config.with_bits(32).validate().is_ok());
    }

    #[test]
    fn degenerate_domains() {
        let bad = [
            Domain::new(0.0, 0.0, -1.0, 1.0),
            Domain::new(1.0, -1.0, -1.0, 1.0),
            Domain::new(-1.0, 1.0, 5.0, 5.0),
            Domain::new(std::f64::NAN, 1.0, -1.0, 1.0),
            Domain::new(-1.0, std::f64::INFINITY, -1.0, 1.0),
            Domain::new(std::f64::MIN, std::f64::MAX, -1.0, 1.0),
        ];
        for domain in bad.iter() {
            let err = domain.validate().unwrap_err();
            assert!(err.is_configuration(), "{:?} accepted", domain);
        }
    }
}
