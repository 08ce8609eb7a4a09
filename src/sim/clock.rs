//! Frame timing
//!
//! The display drives the loop; each callback brings a timestamp and the
//! simulation is advanced by the wall time since the previous one.

use crate::consts::{DEFAULT_FRAME_DT, MAX_FRAME_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed since the previous frame.
    ///
    /// The first frame, and any frame whose delta is zero, negative or not a
    /// number, counts as one 60 Hz frame. Long stalls are clamped.
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => DEFAULT_FRAME_DT,
        };
        if timestamp_ms.is_finite() {
            self.last_ms = Some(timestamp_ms);
        }

        if dt.is_finite() && dt > 0.0 {
            dt.min(MAX_FRAME_DT)
        } else {
            DEFAULT_FRAME_DT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_uses_default() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(12_345.0), DEFAULT_FRAME_DT);
    }

    #[test]
    fn test_measures_wall_time() {
        let mut clock = FrameClock::new();
        clock.delta(1000.0);
        let dt = clock.delta(1000.0 + 1000.0 / 144.0);
        assert!((dt - 1.0 / 144.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_and_backwards_deltas_fall_back() {
        let mut clock = FrameClock::new();
        clock.delta(500.0);
        assert_eq!(clock.delta(500.0), DEFAULT_FRAME_DT);
        assert_eq!(clock.delta(400.0), DEFAULT_FRAME_DT);
        assert_eq!(clock.delta(f64::NAN), DEFAULT_FRAME_DT);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        assert_eq!(clock.delta(5_000.0), MAX_FRAME_DT);
    }
}
