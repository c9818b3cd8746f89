use crate::profile::SyntheticProfile;
use cold_pulses_common::{Depth, Real, SECONDS_PER_MINUTE};
use cold_pulses_filters::{FilterParameters, Interval, IntervalSet};
use serde::Serialize;

fn overlaps(first: &Interval, second: &Interval) -> bool {
    first.start() < second.end() && second.start() < first.end()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct PulseRecord {
    start: usize,
    end: usize,
    start_minutes: Real,
    duration_minutes: Real,
    /// Whether the pulse overlaps any pulse of the other list.
    matched: bool,
}

impl PulseRecord {
    fn new(interval: &Interval, sample_interval: Real, others: &IntervalSet) -> Self {
        let to_minutes = |samples: usize| samples as Real * sample_interval / SECONDS_PER_MINUTE;
        Self {
            start: interval.start(),
            end: interval.end(),
            start_minutes: to_minutes(interval.start()),
            duration_minutes: to_minutes(interval.duration()),
            matched: others.iter().any(|other| overlaps(interval, other)),
        }
    }
}

/// The outcome of one simulated run, written to stdout as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct Report {
    kind: String,
    depth: Depth,
    num_candidates: usize,
    accepted: Vec<PulseRecord>,
    injected: Vec<PulseRecord>,
}

impl Report {
    pub(crate) fn new(
        parameters: &FilterParameters,
        profile: &SyntheticProfile,
        accepted: &IntervalSet,
    ) -> Self {
        let sample_interval = profile.field.sample_interval();
        let records = |pulses: &IntervalSet, others: &IntervalSet| {
            pulses
                .iter()
                .map(|pulse| PulseRecord::new(pulse, sample_interval, others))
                .collect()
        };
        Self {
            kind: parameters.kind.to_string(),
            depth: parameters.depth,
            num_candidates: profile.candidates.len(),
            accepted: records(accepted, &profile.injected),
            injected: records(&profile.injected, accepted),
        }
    }

    pub(crate) fn missed(&self) -> usize {
        self.injected.iter().filter(|record| !record.matched).count()
    }
}
