//! HC-SR04 ultrasonic ranging driver
//!
//! The sensor is excited with a 10 µs trigger pulse and answers with a high
//! pulse on the echo line whose width is the round-trip travel time of the
//! ping. 58 µs of echo correspond to one centimeter of distance, 148 µs to
//! one inch.
//!
//! Note that the HC-SR04 echo pin outputs 5 V; on a 3.3 V board the echo
//! line needs a divider or level shifter.
//!
//! # Example
//!
//! ```ignore
//! use pico_sense::devices::hcsr04::{DistanceUnit, Hcsr04Driver, MedianConfig};
//! use pico_sense::platform::mock::{MockGpio, MockPulse, MockTimer};
//!
//! let mut sensor = Hcsr04Driver::new(MockGpio::new_output(), MockPulse::new(), MockTimer::new());
//! let cm = sensor.measure(DistanceUnit::Centimeters, 400).await?;
//! let filtered = sensor.measure_median(MedianConfig::default(), DistanceUnit::Centimeters).await?;
//! ```

use heapless::Vec;

use crate::platform::{
    traits::{GpioInterface, GpioMode, PinLevel, PulseInput, TimerInterface},
    Result,
};

/// Echo round trip per centimeter, from the HC-SR04 datasheet
pub const US_PER_CM: u32 = 58;

/// Echo round trip per inch
pub const US_PER_INCH: u32 = 148;

/// Reading reported when no valid echo arrived (out of range, timeout)
pub const NO_ECHO: i32 = -1;

/// Default measurement cap in centimeters
pub const DEFAULT_MAX_DISTANCE_CM: u32 = 400;

/// Capacity of the median sample buffer
pub const MAX_MEDIAN_SAMPLES: usize = 16;

/// Output unit for a distance reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceUnit {
    /// Centimeters
    Centimeters,
    /// Inches
    Inches,
    /// Raw echo width in microseconds
    MicroSeconds,
}

impl Default for DistanceUnit {
    fn default() -> Self {
        DistanceUnit::Centimeters
    }
}

/// Configuration for median-filtered measurement
#[derive(Debug, Clone, Copy)]
pub struct MedianConfig {
    /// Number of samples to take, 3-9 recommended (clamped to
    /// `MAX_MEDIAN_SAMPLES`)
    pub samples: usize,

    /// Pause between samples in milliseconds, letting acoustic echoes
    /// dissipate before the next trigger
    pub spacing_ms: u32,

    /// Measurement cap per sample in centimeters
    pub max_distance_cm: u32,
}

impl Default for MedianConfig {
    fn default() -> Self {
        Self {
            samples: 5,
            spacing_ms: 50,
            max_distance_cm: DEFAULT_MAX_DISTANCE_CM,
        }
    }
}

/// HC-SR04 driver owning its trigger output, echo input, and timer
pub struct Hcsr04Driver<TRIG, ECHO, D> {
    trigger: TRIG,
    echo: ECHO,
    timer: D,
}

impl<TRIG, ECHO, D> Hcsr04Driver<TRIG, ECHO, D>
where
    TRIG: GpioInterface,
    ECHO: PulseInput,
    D: TimerInterface,
{
    /// Create a new driver
    pub fn new(trigger: TRIG, echo: ECHO, timer: D) -> Self {
        Self {
            trigger,
            echo,
            timer,
        }
    }

    /// Measure distance once
    ///
    /// Triggers the sensor, waits for the echo pulse bounded by
    /// `max_distance_cm`, and converts the width to `unit`. Returns
    /// `NO_ECHO` when no valid echo arrived within the bound; a sensor
    /// timeout is an ordinary outcome, not an error.
    ///
    /// # Errors
    ///
    /// Propagates platform faults from the pins or timer. Timeouts are not
    /// faults.
    pub async fn measure(&mut self, unit: DistanceUnit, max_distance_cm: u32) -> Result<i32> {
        match self.echo_round_trip_us(max_distance_cm).await? {
            Some(width) if width > 0 => Ok(convert(width, unit)),
            _ => {
                crate::log_trace!("hcsr04: no echo");
                Ok(NO_ECHO)
            }
        }
    }

    /// Measure distance several times and return the median
    ///
    /// Robust against the characteristic noise mode of ultrasonic ranging:
    /// isolated outlier readings from off-axis reflections or electrical
    /// interference. Samples are acquired in microseconds and converted only
    /// at the end, so integer-division error is not compounded. Sample
    /// attempts that time out are discarded; if every attempt times out the
    /// result is `NO_ECHO`.
    ///
    /// With `samples <= 1` this is exactly `measure`.
    pub async fn measure_median(
        &mut self,
        config: MedianConfig,
        unit: DistanceUnit,
    ) -> Result<i32> {
        if config.samples <= 1 {
            return self.measure(unit, config.max_distance_cm).await;
        }

        let mut widths: Vec<u32, MAX_MEDIAN_SAMPLES> = Vec::new();
        for _ in 0..config.samples.min(MAX_MEDIAN_SAMPLES) {
            if let Some(width) = self.echo_round_trip_us(config.max_distance_cm).await? {
                if width > 0 {
                    // Capacity is pre-clamped, push cannot fail
                    let _ = widths.push(width);
                }
            }
            self.timer.pause_ms(config.spacing_ms).await;
        }

        if widths.is_empty() {
            return Ok(NO_ECHO);
        }

        widths.sort_unstable();
        let mid = widths.len() / 2;
        let median_us = if widths.len() % 2 == 0 {
            ((widths[mid - 1] as u64 + widths[mid] as u64) / 2) as u32
        } else {
            widths[mid]
        };

        Ok(convert(median_us, unit))
    }

    /// Excite the sensor and measure the raw echo width in microseconds
    ///
    /// The echo input is forced to a defined no-pull state before each
    /// measurement so a floating line cannot fake an echo. The trigger must
    /// complete before the echo measurement starts; reordering would read
    /// garbage.
    async fn echo_round_trip_us(&mut self, max_distance_cm: u32) -> Result<Option<u32>> {
        self.echo.set_mode(GpioMode::Input)?;

        self.trigger.set_low()?;
        self.timer.delay_us(2)?;
        self.trigger.set_high()?;
        self.timer.delay_us(10)?;
        self.trigger.set_low()?;

        let timeout_us = max_distance_cm.saturating_mul(US_PER_CM);
        Ok(self.echo.pulse_in(PinLevel::High, timeout_us).await)
    }
}

/// Convert an echo width in microseconds to the requested unit
fn convert(width_us: u32, unit: DistanceUnit) -> i32 {
    let value = match unit {
        DistanceUnit::MicroSeconds => width_us,
        DistanceUnit::Inches => width_us / US_PER_INCH,
        DistanceUnit::Centimeters => width_us / US_PER_CM,
    };
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{block_on, MockGpio, MockPulse, MockTimer};

    fn driver_with_script(widths: &[Option<u32>]) -> Hcsr04Driver<MockGpio, MockPulse, MockTimer> {
        let mut echo = MockPulse::new();
        for width in widths {
            match width {
                Some(w) => echo.push_pulse(*w),
                None => echo.push_timeout(),
            }
        }
        Hcsr04Driver::new(MockGpio::new_output(), echo, MockTimer::new())
    }

    #[test]
    fn converts_width_to_every_unit() {
        for (unit, expected) in [
            (DistanceUnit::MicroSeconds, 580),
            (DistanceUnit::Centimeters, 10),
            (DistanceUnit::Inches, 580 / 148),
        ] {
            let mut sensor = driver_with_script(&[Some(580)]);
            let reading = block_on(sensor.measure(unit, 400)).unwrap();
            assert_eq!(reading, expected);
        }
    }

    #[test]
    fn timeout_reads_sentinel_in_every_unit() {
        for unit in [
            DistanceUnit::MicroSeconds,
            DistanceUnit::Centimeters,
            DistanceUnit::Inches,
        ] {
            let mut sensor = driver_with_script(&[None]);
            assert_eq!(block_on(sensor.measure(unit, 400)).unwrap(), NO_ECHO);
        }
    }

    #[test]
    fn zero_width_echo_reads_sentinel() {
        let mut sensor = driver_with_script(&[Some(0)]);
        assert_eq!(
            block_on(sensor.measure(DistanceUnit::Centimeters, 400)).unwrap(),
            NO_ECHO
        );
    }

    #[test]
    fn echo_beyond_range_cap_reads_sentinel() {
        // 100 cm cap = 5800 µs bound; a 9000 µs echo cannot complete in time
        let mut sensor = driver_with_script(&[Some(9000)]);
        assert_eq!(
            block_on(sensor.measure(DistanceUnit::Centimeters, 100)).unwrap(),
            NO_ECHO
        );
    }

    #[test]
    fn trigger_line_pulsed_once_and_left_low() {
        let mut sensor = driver_with_script(&[Some(580)]);
        block_on(sensor.measure(DistanceUnit::Centimeters, 400)).unwrap();

        assert_eq!(sensor.trigger.rising_edges(), 1);
        assert!(!sensor.trigger.read());
    }

    #[test]
    fn repeated_measurements_are_independent() {
        let mut sensor = driver_with_script(&[Some(580), Some(580), Some(580)]);
        for _ in 0..3 {
            assert_eq!(
                block_on(sensor.measure(DistanceUnit::Centimeters, 400)).unwrap(),
                10
            );
        }
    }

    #[test]
    fn median_of_single_sample_equals_single_measurement() {
        for unit in [
            DistanceUnit::MicroSeconds,
            DistanceUnit::Centimeters,
            DistanceUnit::Inches,
        ] {
            let mut single = driver_with_script(&[Some(1234)]);
            let expected = block_on(single.measure(unit, 400)).unwrap();

            let mut median = driver_with_script(&[Some(1234)]);
            let config = MedianConfig {
                samples: 1,
                ..Default::default()
            };
            assert_eq!(
                block_on(median.measure_median(config, unit)).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn odd_sample_count_takes_middle_value() {
        // Unsorted arrival order; 9999 is a valid outlier the median rejects
        let mut sensor = driver_with_script(&[
            Some(140),
            Some(100),
            Some(9999),
            Some(120),
            Some(160),
        ]);
        let config = MedianConfig {
            samples: 5,
            ..Default::default()
        };

        let us = block_on(sensor.measure_median(config, DistanceUnit::MicroSeconds)).unwrap();
        assert_eq!(us, 140);

        // Same set, centimeter output: floor(140 / 58) = 2
        let mut sensor = driver_with_script(&[
            Some(140),
            Some(100),
            Some(9999),
            Some(120),
            Some(160),
        ]);
        let cm = block_on(sensor.measure_median(config, DistanceUnit::Centimeters)).unwrap();
        assert_eq!(cm, 2);
    }

    #[test]
    fn even_sample_count_averages_middle_pair() {
        let mut sensor = driver_with_script(&[Some(400), Some(100), Some(300), Some(200)]);
        let config = MedianConfig {
            samples: 4,
            ..Default::default()
        };

        let us = block_on(sensor.measure_median(config, DistanceUnit::MicroSeconds)).unwrap();
        assert_eq!(us, 250);
    }

    #[test]
    fn even_median_floors_odd_sum() {
        let mut sensor = driver_with_script(&[Some(100), Some(101)]);
        let config = MedianConfig {
            samples: 2,
            ..Default::default()
        };

        let us = block_on(sensor.measure_median(config, DistanceUnit::MicroSeconds)).unwrap();
        assert_eq!(us, 100);
    }

    #[test]
    fn timed_out_samples_are_discarded() {
        let mut sensor = driver_with_script(&[Some(100), None, Some(300), None, None]);
        let config = MedianConfig {
            samples: 5,
            ..Default::default()
        };

        // Valid set is [100, 300], median 200
        let us = block_on(sensor.measure_median(config, DistanceUnit::MicroSeconds)).unwrap();
        assert_eq!(us, 200);
    }

    #[test]
    fn all_samples_timing_out_reads_sentinel() {
        let mut sensor = driver_with_script(&[None, None, None]);
        let config = MedianConfig {
            samples: 3,
            ..Default::default()
        };
        assert_eq!(
            block_on(sensor.measure_median(config, DistanceUnit::Centimeters)).unwrap(),
            NO_ECHO
        );
    }

    #[test]
    fn spacing_pause_runs_after_every_sample() {
        let mut sensor = driver_with_script(&[Some(100), Some(100), Some(100)]);
        let config = MedianConfig {
            samples: 3,
            spacing_ms: 50,
            ..Default::default()
        };
        block_on(sensor.measure_median(config, DistanceUnit::Centimeters)).unwrap();

        // 3 excitations of 12 µs plus 3 pauses of 50 ms on the virtual clock
        assert_eq!(sensor.timer.now_us(), 3 * 12 + 3 * 50_000);
    }
}
