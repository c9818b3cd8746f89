use metrics::{describe_counter, describe_gauge, gauge};

pub fn component_info_metric(name: &'static str) {
    static NAME: &str = "cold_pulses_component_info";

    describe_gauge!(NAME, "Basic information about the component");
    gauge!(NAME, "component" => name).set(1);
}

/// Registers descriptions for the counters emitted by the filter stages.
pub fn describe_filter_metrics() {
    describe_counter!(
        names::CANDIDATES_EXAMINED,
        "Number of candidate pulses presented to a filter stage"
    );
    describe_counter!(
        names::CANDIDATES_KEPT,
        "Number of candidate pulses surviving a filter stage"
    );
}

pub mod names {
    use const_format::concatcp;

    pub const METRIC_NAME_PREFIX: &str = "cold_pulses_";

    pub const CANDIDATES_EXAMINED: &str = concatcp!(METRIC_NAME_PREFIX, "candidates_examined");
    pub const CANDIDATES_KEPT: &str = concatcp!(METRIC_NAME_PREFIX, "candidates_kept");
}

pub mod stage {
    #[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
    pub enum FilterStage {
        MinDuration,
        MaxDuration,
        MaxDrop,
        SpecificIndex,
        MergeOverlaps,
    }

    impl FilterStage {
        /// Human readable name, as used in progress reports.
        pub fn description(self) -> &'static str {
            match self {
                FilterStage::MinDuration => "Filtering short pulses",
                FilterStage::MaxDuration => "Filtering long pulses",
                FilterStage::MaxDrop => "Filtering drops",
                FilterStage::SpecificIndex => "Filtering specific TSI",
                FilterStage::MergeOverlaps => "Merging overlapping pulses",
            }
        }
    }

    // Label building function
    pub fn get_label(stage: FilterStage) -> (&'static str, &'static str) {
        (
            "stage",
            match stage {
                FilterStage::MinDuration => "min_duration",
                FilterStage::MaxDuration => "max_duration",
                FilterStage::MaxDrop => "max_drop",
                FilterStage::SpecificIndex => "specific_index",
                FilterStage::MergeOverlaps => "merge_overlaps",
            },
        )
    }
}
