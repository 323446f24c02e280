/*
 * Fish Backdrop
 *
 * A school of boid-simulated fish drifting over a twinkling starfield:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 * 4. Pointer attraction: Swim towards the cursor when it comes close
 *
 * Set FISH_BACKDROP_CONFIG to a JSON file to override the built-in constants
 * and RUST_LOG to control logging.
 */

use anyhow::{Context, Result};

use fish_backdrop::app;
use fish_backdrop::BackdropConfig;

fn main() -> Result<()> {
    init_tracing();
    let config = BackdropConfig::from_env().context("loading backdrop configuration")?;
    app::run(config);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
