//! TUI module for animal
//!
//! Keyboard piano, parameter list, and an oscilloscope fed by the engine's
//! scope channel.

mod panel;
mod waveform;

use animal_synth::{
    dsp::Waveform, params::ParamId, scope::ScopeReader, synth::message::SynthMessage,
    SynthParams,
};
use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Producer;
use std::time::Duration;

use panel::{render_params, render_status};
use waveform::render_waveform;

/// Piano row, C through C one octave up.
const PIANO_KEYS: [char; 13] = ['a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j', 'k'];
const MIN_OCTAVE: i32 = 0;
const MAX_OCTAVE: i32 = 8;
/// Arrow-key nudge as a fraction of a parameter's range.
const NUDGE_STEPS: f32 = 100.0;

/// MIDI note for a piano-row key in the given octave (octave 4 starts at C4 = 60).
fn key_to_note(key: char, octave: i32) -> Option<u8> {
    let offset = PIANO_KEYS.iter().position(|&k| k == key)? as i32;
    let note = (octave + 1) * 12 + offset;
    u8::try_from(note).ok().filter(|&n| n < 128)
}

/// UI application state
pub struct UiApp {
    scope: ScopeReader,
    notes: Producer<SynthMessage>,
    param_tx: Producer<SynthParams>,
    params: SynthParams,
    sample_rate: f32,
    selected: usize,
    octave: i32,
    held: Option<u8>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        scope: ScopeReader,
        notes: Producer<SynthMessage>,
        param_tx: Producer<SynthParams>,
        params: SynthParams,
        sample_rate: f32,
    ) -> Self {
        Self {
            scope,
            notes,
            param_tx,
            params,
            sample_rate,
            selected: 0,
            octave: 4,
            held: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.scope.poll();

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.send(SynthMessage::AllNotesOff);
        Ok(())
    }

    fn send(&mut self, message: SynthMessage) {
        if self.notes.push(message).is_err() {
            tracing::debug!(?message, "note queue full, dropping");
        }
    }

    fn publish_params(&mut self) {
        if self.param_tx.push(self.params).is_err() {
            tracing::debug!("parameter queue full, dropping snapshot");
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('z') => self.octave = (self.octave - 1).max(MIN_OCTAVE),
            KeyCode::Char('x') => self.octave = (self.octave + 1).min(MAX_OCTAVE),
            KeyCode::Char(' ') => {
                if let Some(note) = self.held.take() {
                    self.send(SynthMessage::NoteOff { note, velocity: 0 });
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.params.waveform = Waveform::from_index(index);
                self.publish_params();
            }
            KeyCode::Char(c) => {
                if let Some(note) = key_to_note(c, self.octave) {
                    self.held = Some(note);
                    self.send(SynthMessage::NoteOn { note, velocity: 100 });
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.checked_sub(1).unwrap_or(ParamId::ALL.len() - 1);
            }
            KeyCode::Down => self.selected = (self.selected + 1) % ParamId::ALL.len(),
            KeyCode::Left => self.nudge(-1.0),
            KeyCode::Right => self.nudge(1.0),
            _ => {}
        }
    }

    fn nudge(&mut self, direction: f32) {
        let id = ParamId::ALL[self.selected];
        let range = id.range();
        let step = match id {
            ParamId::Waveform => 1.0,
            _ => (range.end() - range.start()) / NUDGE_STEPS,
        };

        self.params.set(id, self.params.get(id) + direction * step);
        self.publish_params();
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Scope + params
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        render_status(
            frame,
            rows[0],
            &self.scope.latest(),
            self.octave,
            self.sample_rate,
        );
        render_waveform(frame, columns[0], self.scope.window());
        render_params(frame, columns[1], &self.params, self.selected);

        let help = Paragraph::new(
            " [a-k] Play  [Space] Release  [Z/X] Octave  [1-4] Waveform  [↑↓] Select  [←→] Adjust  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}
