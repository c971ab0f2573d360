//! Raywalk entry point
//!
//! Initializes logging, runs the session, and acts as the single catch
//! boundary: any fatal error is logged to the error stream and the process
//! exits non-zero.

use raywalk::{Config, platform};

fn main() {
    env_logger::init();
    log::info!("Raywalk starting...");

    if let Err(err) = platform::run(Config::default()) {
        log::error!("Fatal: {err}");
        std::process::exit(1);
    }
}
