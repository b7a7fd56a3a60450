#![forbid(unsafe_code)]

//! # tint
//!
//! Accessible light/dark color themes from the command line.
//!
//! ## Usage
//!
//! ```bash
//! tint generate "#3b82f6"                 # Three themes as JSON
//! tint generate "#3b82f6" -f css          # CSS custom properties
//! tint contrast "#64748b" "#ffffff"       # Ratio and WCAG grade
//! tint ensure "#ffffff" "#eeeeee"         # Fix a low-contrast pair
//! tint extract "#f97316" "#7c3aed" "#0ea5e9"
//! ```

use std::io;

use anyhow::Context;
use tint::{Cli, Config};
use tracing_subscriber::EnvFilter;

fn init_tracing(cli: &Cli) {
    // RUST_LOG wins over -v/-q.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_tracing(&cli);

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let stdout = io::stdout();
    tint::run(&cli, &config, &mut stdout.lock())
}
