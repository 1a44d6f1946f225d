use std::sync::Arc;

use smsbridge::bridge::{DeliveryBridge, LinkSlot};
use smsbridge::classifier::SenderClassifier;
use smsbridge::config::load_config;
use smsbridge::ingest::IngestionCore;
use smsbridge::transport::websocket::start_websocket_server;
use smsbridge::utils::error::Error;
use smsbridge::utils::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if let Err(e) = run().await {
        // logging may not be up if config failed
        logging::init("info");
        error!("smsbridge failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = load_config()?;
    logging::init(&config.logging.level);

    let classifier = SenderClassifier::new(&config.classifier.sender_fragments);
    info!("Watching sender fragments: {:?}", classifier.fragments());

    let bridge = DeliveryBridge::new(Arc::new(LinkSlot::new()));
    let core = Arc::new(IngestionCore::new(classifier, bridge));

    tokio::select! {
        res = start_websocket_server(config.addr(), core) => {
            res?;
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}
