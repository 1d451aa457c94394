//! animal - terminal front end for the four-voice synth
//!
//! Run with: cargo run -- [preset.json]

mod app;
mod ui;

use animal_synth::SynthParams;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // The TUI owns stdout; logs go to stderr and default to warnings only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let params = match std::env::args().nth(1) {
        Some(path) => SynthParams::from_json_file(&path)
            .wrap_err_with(|| format!("failed to load preset {path}"))?,
        None => SynthParams::default(),
    };

    app::run(params)
}
