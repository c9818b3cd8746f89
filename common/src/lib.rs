pub mod metrics;
pub mod tracer;

/// Scalar type used for temperatures, depths and index values.
pub type Real = f64;

/// Position of a sample on the time axis of a profile.
pub type SampleIndex = usize;

/// Depth label of a sensor, in metres.
pub type Depth = Real;

/// Number of seconds in one minute, used when converting durations to sample counts.
pub const SECONDS_PER_MINUTE: Real = 60.0;
