//! The filter stages applied to candidate pulses.
//!
//! Each filter is a pure function of its inputs: it borrows the candidate set and
//! returns a new set with the surviving intervals in their original order.
pub mod duration;
pub mod max_drop;
pub mod overlap;
pub mod specific_index;

pub use duration::{duration_in_samples, filter_duration};
pub use max_drop::{filter_max_drop, max_drop};
pub use overlap::merge_overlaps;
pub use specific_index::{filter_specific_index, synthetic_field};

use cold_pulses_common::metrics::{
    names::{CANDIDATES_EXAMINED, CANDIDATES_KEPT},
    stage::{FilterStage, get_label},
};
use metrics::counter;

fn record_stage_metrics(stage: FilterStage, examined: usize, kept: usize) {
    counter!(CANDIDATES_EXAMINED, &[get_label(stage)]).increment(examined as u64);
    counter!(CANDIDATES_KEPT, &[get_label(stage)]).increment(kept as u64);
}
