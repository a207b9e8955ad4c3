#![allow(clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod http_handler;
mod logger;
mod orbit;
mod pipeline;
mod prediction;
mod rendering;

use crate::config::PipelineConfig;
use crate::http_handler::http_client::HTTPClient;
use crate::pipeline::Pipeline;

/// Exit status for an unusable configuration; stage failures use [`pipeline::PipelineError::exit_code`].
const EXIT_CONFIG: i32 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = PipelineConfig::from_env()
        .unwrap_or_else(|e| fatal!(EXIT_CONFIG, "Invalid configuration: {e:?}"));
    let client = HTTPClient::new(&config.tle_base_url, config.request_timeout)
        .unwrap_or_else(|e| fatal!(EXIT_CONFIG, "Could not set up HTTP client: {e:?}"));
    info!("Using TLE provider {}", client.url());

    match Pipeline::new(client, config).run().await {
        Ok(report) => {
            let last = report.track.last().map(ToString::to_string).unwrap_or_default();
            info!("Last observed sample: {last}");
            info!(
                "Predicted next point for {}: lat {:.3}, lon {:.3}",
                report.tle.name(),
                report.forecast.point.latitude,
                report.forecast.point.longitude
            );
            if let Some(loss) = report.forecast.report.final_loss() {
                log!("Final training loss {loss:.4}");
            }
            info!("Map written to {}", report.output_path.display());
        }
        Err(e) => fatal!(e.exit_code(), "Pipeline aborted at stage {e}: {e:?}"),
    }
}
