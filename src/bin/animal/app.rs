//! Audio setup: one cpal output stream driving the engine.
//!
//! The UI thread talks to the audio callback through two rings:
//!
//! ```text
//!   keys  --SynthMessage-->  engine message queue (drained per callback)
//!   knobs --SynthParams--->  latest snapshot wins
//! ```

use animal_synth::{
    scope,
    synth::message::SynthMessage,
    Engine, EngineConfig, SynthParams,
};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use super::ui::UiApp;

const MESSAGE_CAPACITY: usize = 256;
const PARAM_CAPACITY: usize = 16;
/// Roughly a third of a second of scope audio at 48 kHz.
const SCOPE_CAPACITY: usize = 16_384;

pub fn run(params: SynthParams) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let (scope_tap, scope_reader) = scope::channel(SCOPE_CAPACITY);
    let mut engine = Engine::new(
        EngineConfig::new(sample_rate).with_output_channels(channels),
    )
    .wrap_err("output device configuration not supported")?
    .with_scope(scope_tap);

    let (note_tx, mut note_rx) = RingBuffer::<SynthMessage>::new(MESSAGE_CAPACITY);
    let (param_tx, mut param_rx) = RingBuffer::<SynthParams>::new(PARAM_CAPACITY);

    let mut current = params;
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            while let Ok(snapshot) = param_rx.pop() {
                current = snapshot;
            }
            engine.process_interleaved(&current, &mut note_rx, data, channels);
        },
        |err| tracing::error!("audio stream error: {err}"),
        None,
    )?;

    stream.play()?;
    tracing::info!(sample_rate, channels, "audio stream started");

    run_ui(UiApp::new(scope_reader, note_tx, param_tx, params, sample_rate))
}

fn run_ui(mut app: UiApp) -> EyreResult<()> {
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
