//! Generates a synthetic multi-depth temperature profile with injected cold pulses,
//! together with the candidate intervals a detector would hand to the filters.
use crate::collaborators::VerticalGradientIndex;
use clap::Args;
use cold_pulses_common::{Depth, Real, SECONDS_PER_MINUTE};
use cold_pulses_filters::{
    CollaboratorError, FilterError, Interval, IntervalSet, StratificationIndex, TemperatureField,
};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;
use tracing::{debug, info};

/// Samples kept clear at either edge of a pulse slot.
const SLOT_MARGIN: usize = 30;
/// Fraction of a pulse spent at full amplitude before recovering linearly.
const PLATEAU_FRACTION: Real = 0.6;
/// Depth, in metres, over which a pulse's amplitude decays by a factor of e.
const DECAY_SCALE: Depth = 5.0;
const DECOY_MIN_SAMPLES: usize = 5;
const DECOY_MAX_SAMPLES: usize = 120;

#[derive(Debug, Error)]
pub(crate) enum SimulatorError {
    #[error("Invalid noise: {0}")]
    Noise(#[from] NormalError),
    #[error("Pulse durations must satisfy 0 < min <= max, got {min} and {max} minutes")]
    PulseDurations { min: Real, max: Real },
    #[error("{pulses} pulses of up to {max_len} samples do not fit in {samples} samples")]
    TooManyPulses {
        pulses: usize,
        max_len: usize,
        samples: usize,
    },
    #[error("Reference index: {0}")]
    ReferenceIndex(#[source] CollaboratorError),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ProfileSettings {
    /// Number of time samples in the profile.
    #[clap(long, default_value = "2880")]
    pub(crate) samples: usize,

    /// Seconds between consecutive samples.
    #[clap(long, default_value = "60")]
    pub(crate) sample_interval: Real,

    /// Sensor depths in metres, shallowest first.
    #[clap(long, value_delimiter = ',', default_values_t = vec![5.0, 10.0, 15.0, 20.0, 25.0])]
    pub(crate) depths: Vec<Depth>,

    /// Undisturbed temperature at the surface.
    #[clap(long, default_value = "28")]
    pub(crate) surface_temperature: Real,

    /// Undisturbed cooling, in degrees per metre of depth.
    #[clap(long, default_value = "0.04")]
    pub(crate) gradient: Real,

    /// Standard deviation of the sensor noise.
    #[clap(long, default_value = "0.005")]
    pub(crate) noise_std: Real,

    /// Number of cold pulses injected.
    #[clap(long, default_value = "6")]
    pub(crate) pulses: usize,

    /// Cooling at the target depth at the height of a pulse.
    #[clap(long, default_value = "2")]
    pub(crate) pulse_amplitude: Real,

    #[clap(long, default_value = "30")]
    pub(crate) min_pulse_minutes: Real,

    #[clap(long, default_value = "180")]
    pub(crate) max_pulse_minutes: Real,

    /// Number of random candidates drawn outside the injected pulses.
    #[clap(long, default_value = "20")]
    pub(crate) decoys: usize,

    /// Seed of the random number generator.
    #[clap(long, default_value = "0")]
    pub(crate) seed: u64,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            samples: 2880,
            sample_interval: 60.0,
            depths: vec![5.0, 10.0, 15.0, 20.0, 25.0],
            surface_temperature: 28.0,
            gradient: 0.04,
            noise_std: 0.005,
            pulses: 6,
            pulse_amplitude: 2.0,
            min_pulse_minutes: 30.0,
            max_pulse_minutes: 180.0,
            decoys: 20,
            seed: 0,
        }
    }
}

impl ProfileSettings {
    fn pulse_len(&self, minutes: Real) -> usize {
        (minutes * SECONDS_PER_MINUTE / self.sample_interval).round() as usize
    }
}

/// Relative cooling `k` samples into a pulse lasting `len` samples.
fn pulse_shape(k: usize, len: usize) -> Real {
    let plateau = (PLATEAU_FRACTION * len as Real).ceil() as usize;
    if k < plateau {
        1.0
    } else {
        (len - k) as Real / (len - plateau) as Real
    }
}

pub(crate) struct SyntheticProfile {
    pub(crate) field: TemperatureField,
    /// The pulses written into the field.
    pub(crate) injected: IntervalSet,
    pub(crate) candidates: IntervalSet,
    /// Stratification index of the undisturbed, noise free profile.
    pub(crate) reference_index: Array1<Real>,
}

impl SyntheticProfile {
    /// Builds the profile with pulses centred on `target_depth`.
    ///
    /// Each pulse gets its own slot of the time axis. Every pulse yields two overlapping
    /// candidates starting one sample before it, covering its first half and its whole
    /// length respectively. Decoy candidates overlapping a pulse are discarded, so fewer
    /// than `decoys` may be produced.
    #[tracing::instrument(skip_all, fields(seed = settings.seed, target_depth = target_depth))]
    pub(crate) fn generate(
        settings: &ProfileSettings,
        target_depth: Depth,
    ) -> Result<Self, SimulatorError> {
        let (min_minutes, max_minutes) = (settings.min_pulse_minutes, settings.max_pulse_minutes);
        if !(min_minutes > 0.0 && min_minutes <= max_minutes && max_minutes.is_finite()) {
            return Err(SimulatorError::PulseDurations {
                min: min_minutes,
                max: max_minutes,
            });
        }

        let depths = settings.depths.clone();
        let background = Array2::from_shape_fn((depths.len(), settings.samples), |(row, _)| {
            settings.surface_temperature - settings.gradient * depths[row]
        });
        // Validates the axes before any samples are drawn.
        let undisturbed =
            TemperatureField::new(depths.clone(), background.clone(), settings.sample_interval)?;
        undisturbed.depth_index(target_depth)?;
        let reference_index = VerticalGradientIndex
            .index(&undisturbed)
            .map_err(SimulatorError::ReferenceIndex)?;

        let mut rng = StdRng::seed_from_u64(settings.seed);
        let noise = Normal::new(0.0, settings.noise_std)?;
        let mut values = background.mapv(|t| t + noise.sample(&mut rng));

        let injected = Self::place_pulses(settings, &mut rng)?;
        for pulse in &injected {
            for (row, &depth) in depths.iter().enumerate() {
                let amplitude =
                    settings.pulse_amplitude * (-(depth - target_depth).abs() / DECAY_SCALE).exp();
                for (k, t) in pulse.window().enumerate() {
                    values[[row, t]] -= amplitude * pulse_shape(k, pulse.duration());
                }
            }
        }

        let mut candidates = IntervalSet::new();
        for pulse in &injected {
            let start = pulse.start() - 1;
            let half = pulse.start() + pulse.duration() / 2;
            candidates.extend(Interval::new(start, half));
            candidates.extend(Interval::new(start, pulse.end()));
        }
        let decoys = Self::draw_decoys(settings, &injected, &mut rng);
        debug!("Drew {} decoys", decoys.len());
        candidates.extend(decoys);

        info!(
            "Generated {} samples at {} depths with {} pulses and {} candidates",
            settings.samples,
            depths.len(),
            injected.len(),
            candidates.len()
        );
        Ok(Self {
            field: TemperatureField::new(depths, values, settings.sample_interval)?,
            injected,
            candidates,
            reference_index,
        })
    }

    fn place_pulses(
        settings: &ProfileSettings,
        rng: &mut StdRng,
    ) -> Result<IntervalSet, SimulatorError> {
        if settings.pulses == 0 {
            return Ok(IntervalSet::new());
        }
        let slot = settings.samples / settings.pulses;
        // Pulses shorter than two samples are lengthened, so both bounds are at least two.
        let min_len = settings.pulse_len(settings.min_pulse_minutes).max(2);
        let max_len = settings.pulse_len(settings.max_pulse_minutes).max(min_len);
        if slot < max_len.saturating_add(2 * SLOT_MARGIN) {
            return Err(SimulatorError::TooManyPulses {
                pulses: settings.pulses,
                max_len,
                samples: settings.samples,
            });
        }

        let pulses = (0..settings.pulses)
            .filter_map(|n| {
                let len = rng.random_range(min_len..=max_len);
                let offset = rng.random_range(SLOT_MARGIN..=slot - SLOT_MARGIN - len);
                let start = n * slot + offset;
                Interval::new(start, start + len)
            })
            .collect();
        Ok(pulses)
    }

    fn draw_decoys(
        settings: &ProfileSettings,
        injected: &IntervalSet,
        rng: &mut StdRng,
    ) -> Vec<Interval> {
        let max_len = DECOY_MAX_SAMPLES.min(settings.samples / 4);
        if max_len < DECOY_MIN_SAMPLES {
            return Vec::new();
        }
        (0..settings.decoys)
            .filter_map(|_| {
                let len = rng.random_range(DECOY_MIN_SAMPLES..=max_len);
                let start = rng.random_range(1..=settings.samples - len);
                Interval::new(start, start + len)
            })
            .filter(|decoy| {
                injected
                    .iter()
                    .all(|pulse| decoy.end() <= pulse.start() || decoy.start() >= pulse.end())
            })
            .collect()
    }
}
