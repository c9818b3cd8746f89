//! Runs the cold pulse filters over a synthetic temperature profile and reports how
//! the accepted pulses compare with the injected ones.
mod collaborators;
mod profile;
mod report;

use clap::Parser;
use cold_pulses_common::{
    init_tracer,
    metrics::{component_info_metric, describe_filter_metrics},
};
use cold_pulses_filters::{FilterParameters, PulsePipeline, TracingProgress};
use collaborators::{UpperHullInterpolator, VerticalGradientIndex};
use metrics_exporter_prometheus::PrometheusBuilder;
use profile::{ProfileSettings, SyntheticProfile};
use report::Report;
use tracing::{info, level_filters::LevelFilter, warn};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    #[command(flatten)]
    profile: ProfileSettings,

    #[command(flatten)]
    filters: FilterParameters,

    /// Pretty-print the JSON report.
    #[clap(long)]
    pretty: bool,

    /// Write the filter stage counters to stderr in Prometheus text format.
    #[clap(long)]
    print_metrics: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tracer = init_tracer!(LevelFilter::INFO)?;
    info!("Starting {}", tracer.service_name());
    let metrics = PrometheusBuilder::new().install_recorder()?;
    component_info_metric("pulse-simulator");
    describe_filter_metrics();

    let profile = SyntheticProfile::generate(&cli.profile, cli.filters.depth)?;
    let pipeline = PulsePipeline::new(cli.filters, VerticalGradientIndex, UpperHullInterpolator)?
        .with_reporter(TracingProgress);
    let pulses = pipeline.run(
        &profile.field,
        profile.candidates.clone(),
        profile.reference_index.view(),
    )?;

    let report = Report::new(pipeline.parameters(), &profile, &pulses);
    match report.missed() {
        0 => info!("Every injected pulse was recovered"),
        missed => warn!("{missed} injected pulses were not recovered"),
    }

    let stdout = std::io::stdout().lock();
    if cli.pretty {
        serde_json::to_writer_pretty(stdout, &report)?;
    } else {
        serde_json::to_writer(stdout, &report)?;
    }
    println!();

    if cli.print_metrics {
        eprint!("{}", metrics.render());
    }
    Ok(())
}
