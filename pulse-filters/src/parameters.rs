//! Defines the parameters used by the filter stages.
use crate::error::{FilterError, FilterResult};
use clap::{Args, ValueEnum};
use cold_pulses_common::{Depth, Real};
use std::str::FromStr;

/// Whether a duration filter removes short or long candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DurationKind {
    /// Keep candidates lasting at least the threshold.
    Min,
    /// Keep candidates lasting at most the threshold.
    Max,
}

impl DurationKind {
    /// Parses "min" or "max".
    pub fn parse(kind: &str) -> FilterResult<Self> {
        <Self as FromStr>::from_str(kind)
            .map_err(|_| FilterError::UnknownDurationKind(kind.to_owned()))
    }
}

/// Direction of the stratification anomaly a pulse produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, ValueEnum)]
pub enum PulseKind {
    /// Warm-intrusion-like pulses, seen from the top of the profile.
    #[strum(serialize = "top")]
    Top,
    /// Cold-intrusion-like pulses, seen from the bottom of the profile.
    #[default]
    #[strum(serialize = "bot")]
    Bot,
}

impl PulseKind {
    /// Parses "top" or "bot".
    pub fn parse(kind: &str) -> FilterResult<Self> {
        <Self as FromStr>::from_str(kind)
            .map_err(|_| FilterError::UnknownPulseKind(kind.to_owned()))
    }
}

/// Encapsulates the thresholds applied by the pulse filter pipeline.
#[derive(Debug, Clone, Args)]
pub struct FilterParameters {
    /// Depth, in metres, of the sensor the pulses are detected at.
    #[clap(long, default_value = "25")]
    pub depth: Depth,

    /// Candidates shorter than this many minutes are discarded.
    #[clap(long, default_value = "10")]
    pub min_duration: Real,

    /// Merged pulses longer than this many minutes are discarded.
    #[clap(long, default_value = "1440")]
    pub max_duration: Real,

    /// Minimum temperature drop at the target depth, below which a candidate is noise.
    #[clap(long, default_value = "0.01")]
    pub drop_cut_off: Real,

    /// Reference magnitude of the specific stratification index.
    #[clap(long, default_value = "0.04")]
    pub min_stsi: Real,

    /// The type of pulse being filtered.
    #[clap(long, value_enum, default_value = "bot")]
    pub kind: PulseKind,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            depth: 25.0,
            min_duration: 10.0,
            max_duration: 1440.0,
            drop_cut_off: 0.01,
            min_stsi: 0.04,
            kind: PulseKind::Bot,
        }
    }
}

impl FilterParameters {
    /// Checks every threshold before any filtering takes place.
    pub fn validate(&self) -> FilterResult<()> {
        check_duration(self.min_duration)?;
        check_duration(self.max_duration)?;
        check_cut_off(self.drop_cut_off)?;
        check_cut_off(self.min_stsi)
    }
}

pub(crate) fn check_duration(minutes: Real) -> FilterResult<()> {
    if minutes.is_finite() && minutes >= 0.0 {
        Ok(())
    } else {
        Err(FilterError::InvalidDuration(minutes))
    }
}

pub(crate) fn check_cut_off(cut_off: Real) -> FilterResult<()> {
    if cut_off.is_finite() && cut_off >= 0.0 {
        Ok(())
    } else {
        Err(FilterError::InvalidCutOff(cut_off))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        parameters: FilterParameters,
    }

    #[test]
    fn kinds_parse_from_strings() {
        assert_eq!(DurationKind::parse("min").unwrap(), DurationKind::Min);
        assert_eq!(DurationKind::parse("max").unwrap(), DurationKind::Max);
        assert_eq!(PulseKind::parse("top").unwrap(), PulseKind::Top);
        assert_eq!(PulseKind::parse("bot").unwrap(), PulseKind::Bot);
        assert_eq!(PulseKind::Bot.to_string(), "bot");
        assert_eq!(DurationKind::Max.to_string(), "max");
    }

    #[test]
    fn unknown_kinds_are_configuration_errors() {
        assert!(matches!(
            DurationKind::parse("mean"),
            Err(FilterError::UnknownDurationKind(k)) if k == "mean"
        ));
        assert!(matches!(
            PulseKind::parse("bottom"),
            Err(FilterError::UnknownPulseKind(k)) if k == "bottom"
        ));
    }

    #[test]
    fn command_line_defaults() {
        let cli = Cli::parse_from(["filter"]);
        assert_eq!(cli.parameters.depth, 25.0);
        assert_eq!(cli.parameters.min_duration, 10.0);
        assert_eq!(cli.parameters.max_duration, 1440.0);
        assert_eq!(cli.parameters.kind, PulseKind::Bot);
        assert!(cli.parameters.validate().is_ok());
    }

    #[test]
    fn command_line_overrides() {
        let cli = Cli::parse_from([
            "filter",
            "--depth",
            "10",
            "--kind",
            "top",
            "--drop-cut-off",
            "0.2",
        ]);
        assert_eq!(cli.parameters.depth, 10.0);
        assert_eq!(cli.parameters.kind, PulseKind::Top);
        assert_eq!(cli.parameters.drop_cut_off, 0.2);
    }

    #[test]
    fn invalid_thresholds_fail_validation() {
        let parameters = FilterParameters {
            drop_cut_off: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            parameters.validate(),
            Err(FilterError::InvalidCutOff(_))
        ));
        let parameters = FilterParameters {
            min_duration: Real::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            parameters.validate(),
            Err(FilterError::InvalidDuration(_))
        ));
    }
}
