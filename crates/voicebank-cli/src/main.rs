//! Voicebank - download every voice sample listed in voice-index.json

use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod settings;

use voicebank_core::{run_from_config, ConsoleReporter, HttpDownloader};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voicebank=warn,voicebank_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = settings::load()?;
    debug!("Configuration: {:?}", config);
    info!("Output directory: {:?}", config.output_dir);

    let downloader = HttpDownloader::new(&config)?;
    let mut reporter = ConsoleReporter::stdout();

    match run_from_config(&config, &downloader, &mut reporter) {
        Ok(counters) => {
            debug!("Run complete: {:?}", counters);
            Ok(())
        }
        // Already reported; a bad manifest ends the run like a normal one.
        Err(e) if e.is_manifest_error() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
