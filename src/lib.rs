//! # kinemetry
//!
//! Movement feature extraction and paper artifacts for a Kinect
//! motion-tracking study. The raw inputs are per-participant skeletal
//! joint recordings (15 joints, x/y/z per sensor frame) and the behavioral
//! response log from the experiment runner; the outputs are augmented and
//! summarized CSVs, scatter-plot figures, and LaTeX table fragments.
//!
//! Each binary under `src/bin/` is one independent batch step; they share
//! this library but no runtime state.

pub mod config;
pub mod core;
pub mod data;
pub mod deps;
pub mod error;
pub mod figures;
pub mod tables;

pub use config::AppConfig;
pub use error::{Error, Result};

/// Console logging for the command-line tools; `--verbose` switches the
/// default level to debug, `RUST_LOG` still wins when set.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
