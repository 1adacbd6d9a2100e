use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, warn};

use fontcanon::cli::Args;
use fontcanon::font::provider_for;
use fontcanon::organizer::run_batch;
use fontcanon::utils::logging;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.debug);

    let config = args.into_config()?;
    debug!("Using configuration: {:?}", config);

    let provider = provider_for(config.metadata_backend)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        warn!("Interrupted, stopping after the current font");
        handler_flag.store(true, Ordering::SeqCst);
    })?;

    let summary = run_batch(&config, provider.as_ref(), &cancel)?;
    println!("{}", summary);

    Ok(())
}
