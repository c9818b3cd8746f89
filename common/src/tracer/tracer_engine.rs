use thiserror::Error;
use tracing::{debug, level_filters::LevelFilter, subscriber::SetGlobalDefaultError};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt};

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("Cannot install global subscriber: {0}")]
    SetGlobalDefault(#[from] SetGlobalDefaultError),
}

pub struct TracerOptions {
    /// Level applied to events when no `RUST_LOG` directive matches.
    pub default_level: LevelFilter,
}

/// This object initialises the stderr tracer, given a TracerOptions struct.
pub struct TracerEngine {
    service_name: String,
}

impl TracerEngine {
    /// Initialises the stderr tracer for the crate
    /// #Arguments
    /// * `options` - The caller-specified instance of TracerOptions.
    /// * `service_name` - The name of the binary the tracer belongs to.
    /// * `module_name` - The name of the current module.
    /// #Returns
    /// An instance of TracerEngine, or an error if a global subscriber already exists.
    pub fn new(
        options: TracerOptions,
        service_name: &str,
        module_name: &str,
    ) -> Result<Self, TracerError> {
        let stderr_tracer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        // This filter is applied to the stderr tracer
        let log_filter = EnvFilter::builder()
            .with_default_directive(options.default_level.into())
            .from_env_lossy();

        let subscriber =
            tracing_subscriber::Registry::default().with(stderr_tracer.with_filter(log_filter));

        tracing::subscriber::set_global_default(subscriber)?;
        debug!("Tracer initialised for {service_name} in {module_name}");

        Ok(Self {
            service_name: service_name.to_owned(),
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_once_per_process() {
        let options = || TracerOptions {
            default_level: LevelFilter::WARN,
        };
        let engine = TracerEngine::new(options(), "cold-pulses", module_path!());
        assert!(matches!(&engine, Ok(engine) if engine.service_name() == "cold-pulses"));
        assert!(matches!(
            TracerEngine::new(options(), "cold-pulses", module_path!()),
            Err(TracerError::SetGlobalDefault(_))
        ));
    }
}
