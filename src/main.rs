mod config;
mod logging;
mod network;
#[cfg(test)]
mod test_utils;
mod web;

use std::sync::Arc;

use clap::Parser;

use config::Args;
use network::device_control::RokuController;

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(&args.log_level) {
        eprintln!("{}", e);
    }

    // The blocking client owns a runtime of its own, so it is built and
    // dropped outside the server's.
    let roku = RokuController::new(&args.client_config()).map_err(std::io::Error::other)?;
    tracing::info!(
        device_port = args.device_port,
        timeout_secs = args.timeout_secs,
        "device client ready"
    );

    let sys = actix_rt::System::new();
    let result = sys.block_on(web::serve(&args.host, args.port, Arc::new(roku)));
    if let Err(e) = &result {
        tracing::error!(error = %e, "web server stopped");
    }
    result
}
