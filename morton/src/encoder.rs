use crate::config::*;
use crate::error::{Axis, MortonError};
use crate::morton::{deinterleave, interleave};

/// Maps coordinate pairs to Morton codes under a validated configuration.
///
/// Each axis is quantized on `bits_per_axis` bits with
/// `q = floor((v - min) / (max - min) * (2^B - 1))`, then the two quantized
/// values are interleaved according to the configured `AxisOrder`. The
/// encoder holds no mutable state, so a single instance can be shared by any
/// number of threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoder {
    config: EncoderConfig,
    /// `2^B - 1`, the largest quantized value on each axis
    max_cell: u32,
}

impl Encoder {
    pub fn new(config: EncoderConfig) -> Result<Self, MortonError> {
        config.validate()?;
        let max_cell = if config.bits_per_axis == 32 {
            std::u32::MAX
        } else {
            (1_u32 << config.bits_per_axis) - 1
        };
        Ok(Self { config, max_cell })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn bits_per_axis(&self) -> u32 {
        self.config.bits_per_axis
    }

    /// The largest code this encoder can produce, `2^(2B) - 1`.
    pub fn max_code(&self) -> u64 {
        if self.config.bits_per_axis == 32 {
            std::u64::MAX
        } else {
            (1_u64 << (2 * self.config.bits_per_axis)) - 1
        }
    }

    pub fn encode(&self, x: f64, y: f64) -> Result<u64, MortonError> {
        let qx = self.quantize_x(x)?;
        let qy = self.quantize_y(y)?;
        Ok(match self.config.order {
            AxisOrder::XMajor => interleave(qx, qy),
            AxisOrder::YMajor => interleave(qy, qx),
        })
    }

    /// Returns the lower left corner of the cell identified by `code`.
    pub fn decode(&self, code: u64) -> Result<(f64, f64), MortonError> {
        if code > self.max_code() {
            return Err(MortonError::InvalidCode {
                code,
                bits: 2 * self.bits_per_axis(),
            });
        }
        let (odd, even) = deinterleave(code);
        let (qx, qy) = match self.config.order {
            AxisOrder::XMajor => (odd, even),
            AxisOrder::YMajor => (even, odd),
        };
        let domain = &self.config.domain;
        Ok((
            self.dequantize(qx, domain.xmin, domain.xmax),
            self.dequantize(qy, domain.ymin, domain.ymax),
        ))
    }

    pub fn quantize_x(&self, x: f64) -> Result<u32, MortonError> {
        let domain = &self.config.domain;
        self.quantize(Axis::X, x, domain.xmin, domain.xmax)
    }

    pub fn quantize_y(&self, y: f64) -> Result<u32, MortonError> {
        let domain = &self.config.domain;
        self.quantize(Axis::Y, y, domain.ymin, domain.ymax)
    }

    fn quantize(&self, axis: Axis, value: f64, min: f64, max: f64) -> Result<u32, MortonError> {
        if !value.is_finite() {
            return Err(MortonError::InvalidInput {
                axis,
                value,
                reason: "not a finite number".to_owned(),
            });
        }
        let value = if value < min || value > max {
            match self.config.policy {
                RangePolicy::Reject => {
                    return Err(MortonError::InvalidInput {
                        axis,
                        value,
                        reason: format!("outside of the domain [{}, {}]", min, max),
                    })
                }
                RangePolicy::Clamp => value.max(min).min(max),
            }
        } else {
            value
        };
        let scale = self.max_cell as f64;
        let q = ((value - min) / (max - min) * scale).floor();
        // guard against rounding at the upper bound
        Ok(q.max(0.0).min(scale) as u32)
    }

    fn dequantize(&self, q: u32, min: f64, max: f64) -> f64 {
        min + (q as f64 / self.max_cell as f64) * (max - min)
    }
}

/// Encodes a single pair with the default axis order and the reject policy.
pub fn encode(x: f64, y: f64, bits_per_axis: u32, domain: Domain) -> Result<u64, MortonError> {
    let config = EncoderConfig::default()
        .with_bits(bits_per_axis)
        .with_domain(domain);
    Encoder::new(config)?.encode(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn geo(bits: u32) -> Encoder {
        Encoder::new(EncoderConfig::default().with_bits(bits)).unwrap()
    }

    fn random_point<R: Rng>(rng: &mut R, domain: &Domain) -> (f64, f64) {
        (
            rng.gen_range(domain.xmin, domain.xmax),
            rng.gen_range(domain.ymin, domain.ymax),
        )
    }

    #[test]
    fn deterministic() {
        let mut rng = StdRng::seed_from_u64(4361356);
        let encoder = geo(32);
        for _ in 0..1000 {
            let (x, y) = random_point(&mut rng, &Domain::GEOGRAPHIC);
            assert_eq!(encoder.encode(x, y), encoder.encode(x, y));
            assert_eq!(
                encoder.encode(x, y).unwrap(),
                encode(x, y, 32, Domain::GEOGRAPHIC).unwrap()
            );
        }
    }

    #[test]
    fn code_fits_in_bits() {
        let mut rng = StdRng::seed_from_u64(13098235);
        for bits in 1..=32 {
            let encoder = geo(bits);
            for _ in 0..200 {
                let (x, y) = random_point(&mut rng, &Domain::GEOGRAPHIC);
                let code = encoder.encode(x, y).unwrap();
                assert!(code <= encoder.max_code());
                if bits < 32 {
                    assert!(code < 1_u64 << (2 * bits));
                }
            }
        }
    }

    fn assert_non_decreasing<F>(mut values: Vec<f64>, quantize: F)
    where
        F: Fn(f64) -> u32,
    {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let qs: Vec<u32> = values.iter().map(|&v| quantize(v)).collect();
        for w in qs.windows(2) {
            assert!(w[0] <= w[1], "quantization not monotonic: {:?}", w);
        }
    }

    #[test]
    fn quantization_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(1234);
        let projected = Domain::new(350_000.0, 1_250_000.0, 4_000_000.0, 5_500_000.0);
        for &domain in &[Domain::GEOGRAPHIC, projected] {
            for &bits in &[1, 8, 16, 31, 32] {
                let encoder =
                    Encoder::new(EncoderConfig::default().with_bits(bits).with_domain(domain))
                        .unwrap();
                assert_eq!(encoder.bits_per_axis(), bits);

                let mut xs: Vec<f64> = (0..1000)
                    .map(|_| rng.gen_range(domain.xmin, domain.xmax))
                    .collect();
                xs.push(domain.xmin);
                xs.push(domain.xmax);
                assert_non_decreasing(xs, |x| encoder.quantize_x(x).unwrap());

                let mut ys: Vec<f64> = (0..1000)
                    .map(|_| rng.gen_range(domain.ymin, domain.ymax))
                    .collect();
                ys.push(domain.ymin);
                ys.push(domain.ymax);
                assert_non_decreasing(ys, |y| encoder.quantize_y(y).unwrap());
            }
        }
    }

    #[test]
    fn domain_corners() {
        for bits in 1..=32 {
            let encoder = geo(bits);
            assert_eq!(encoder.encode(-180.0, -90.0).unwrap(), 0);
            assert_eq!(encoder.encode(180.0, 90.0).unwrap(), encoder.max_code());
        }
        assert_eq!(geo(8).encode(180.0, 90.0).unwrap(), 65535);
        assert_eq!(geo(32).encode(180.0, 90.0).unwrap(), std::u64::MAX);
    }

    #[test]
    fn origin_with_eight_bits() {
        let encoder = geo(8);
        assert_eq!(encoder.quantize_x(0.0).unwrap(), 127);
        assert_eq!(encoder.quantize_y(0.0).unwrap(), 127);
        assert_eq!(encoder.encode(0.0, 0.0).unwrap(), 16383);
        assert_eq!(encoder.encode(-180.0, -90.0).unwrap(), 0);
        assert_eq!(encoder.encode(180.0, 90.0).unwrap(), 65535);
    }

    #[test]
    fn axis_order() {
        let x_major = geo(8);
        let y_major = Encoder::new(
            EncoderConfig::default()
                .with_bits(8)
                .with_order(AxisOrder::YMajor),
        )
        .unwrap();
        // x at its maximum, y at its minimum
        assert_eq!(x_major.encode(180.0, -90.0).unwrap(), 0xAAAA);
        assert_eq!(y_major.encode(180.0, -90.0).unwrap(), 0x5555);
        assert_eq!(x_major.encode(-180.0, 90.0).unwrap(), 0x5555);
        assert_eq!(y_major.encode(-180.0, 90.0).unwrap(), 0xAAAA);
    }

    #[test]
    fn rejects_non_finite() {
        let encoder = geo(32);
        for &(x, y) in &[
            (std::f64::NAN, 0.0),
            (0.0, std::f64::NAN),
            (std::f64::INFINITY, 0.0),
            (0.0, std::f64::NEG_INFINITY),
        ] {
            let err = encoder.encode(x, y).unwrap_err();
            assert!(err.is_invalid_input());
        }
        let clamping = Encoder::new(EncoderConfig::default().with_policy(RangePolicy::Clamp)).unwrap();
        assert!(clamping.encode(std::f64::NAN, 0.0).unwrap_err().is_invalid_input());
        assert!(clamping.encode(std::f64::INFINITY, 0.0).unwrap_err().is_invalid_input());
    }

    #[test]
    fn rejects_out_of_domain() {
        let err = encode(200.0, 0.0, 32, Domain::GEOGRAPHIC).unwrap_err();
        match err {
            MortonError::InvalidInput { axis, value, .. } => {
                assert_eq!(axis, Axis::X);
                assert_eq!(value, 200.0);
            }
            other => panic!("unexpected error {:?}", other),
        }
        let err = geo(16).encode(0.0, -90.5).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn clamps_out_of_domain() {
        let encoder = Encoder::new(
            EncoderConfig::default()
                .with_bits(8)
                .with_policy(RangePolicy::Clamp),
        )
        .unwrap();
        assert_eq!(encoder.encode(200.0, 0.0), encoder.encode(180.0, 0.0));
        assert_eq!(encoder.encode(-1000.0, -1000.0).unwrap(), 0);
        assert_eq!(encoder.encode(1000.0, 1000.0).unwrap(), 65535);
    }

    #[test]
    fn configuration_errors() {
        assert!(encode(0.0, 0.0, 0, Domain::GEOGRAPHIC)
            .unwrap_err()
            .is_configuration());
        assert!(encode(0.0, 0.0, 33, Domain::GEOGRAPHIC)
            .unwrap_err()
            .is_configuration());
        assert!(encode(0.0, 0.0, 8, Domain::new(1.0, 1.0, 0.0, 1.0))
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn projected_domain() {
        let domain = Domain::new(0.0, 1000.0, 0.0, 500.0);
        assert_eq!(encode(0.0, 0.0, 4, domain).unwrap(), 0);
        assert_eq!(encode(1000.0, 500.0, 4, domain).unwrap(), 255);
        // the geographic domain would reject this point
        assert!(encode(750.0, 250.0, 4, domain).is_ok());
        assert!(encode(750.0, 250.0, 4, Domain::GEOGRAPHIC).is_err());
    }

    #[test]
    fn decode_corners() {
        let encoder = geo(8);
        assert_eq!(encoder.decode(0).unwrap(), (-180.0, -90.0));
        assert_eq!(encoder.decode(65535).unwrap(), (180.0, 90.0));
        match encoder.decode(65536).unwrap_err() {
            MortonError::InvalidCode { code, bits } => {
                assert_eq!(code, 65536);
                assert_eq!(bits, 16);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(geo(32).decode(std::u64::MAX).is_ok());
    }

    #[test]
    fn decode_is_close() {
        let mut rng = StdRng::seed_from_u64(42);
        for &order in &[AxisOrder::XMajor, AxisOrder::YMajor] {
            for &bits in &[4, 12, 24, 32] {
                let encoder =
                    Encoder::new(EncoderConfig::default().with_bits(bits).with_order(order))
                        .unwrap();
                let cells = encoder.max_cell as f64;
                for _ in 0..500 {
                    let (x, y) = random_point(&mut rng, &Domain::GEOGRAPHIC);
                    let (dx, dy) = encoder.decode(encoder.encode(x, y).unwrap()).unwrap();
                    assert!((x - dx).abs() <= 360.0 / cells + 1e-9);
                    assert!((y - dy).abs() <= 180.0 / cells + 1e-9);
                }
            }
        }
    }

    #[test]
    fn shared_between_threads() {
        let encoder = geo(16);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let x = -180.0 + 90.0 * i as f64;
                    (0..100)
                        .map(|j| encoder.encode(x, -90.0 + j as f64).unwrap())
                        .collect::<Vec<u64>>()
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let codes = h.join().unwrap();
            let x = -180.0 + 90.0 * i as f64;
            for (j, code) in codes.into_iter().enumerate() {
                assert_eq!(code, encoder.encode(x, -90.0 + j as f64).unwrap());
            }
        }
    }
}
