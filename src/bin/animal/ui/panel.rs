//! Status bar and parameter list

use animal_synth::{params::ParamId, scope::DisplayFrame, SynthParams};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

fn note_name(note: u8) -> String {
    let octave = i32::from(note / 12) - 1;
    format!("{}{}", NOTE_NAMES[usize::from(note % 12)], octave)
}

/// Render the status bar: waveform, note, octave, and an envelope meter.
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    display: &DisplayFrame,
    octave: i32,
    sample_rate: f32,
) {
    let block = Block::default().title(" animal ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let note = display.note.map(note_name).unwrap_or_else(|| "--".to_string());
    let line = Line::from(vec![
        Span::styled(
            format!(" {:<8}", display.waveform.name()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("Note: {note:<4} "), Style::default().fg(Color::Cyan)),
        Span::styled(format!("Octave: {octave}  "), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let label_width = (line.width() as u16).min(inner.width);
    frame.render_widget(
        Paragraph::new(line),
        Rect { width: label_width, ..inner },
    );

    let meter = Gauge::default()
        .gauge_style(Style::default().fg(Color::LightGreen))
        .ratio(f64::from(display.envelope_level.clamp(0.0, 1.0)))
        .label("env");
    frame.render_widget(
        meter,
        Rect {
            x: inner.x + label_width,
            width: inner.width - label_width,
            ..inner
        },
    );
}

/// Render every parameter with the selected one highlighted.
pub fn render_params(frame: &mut Frame, area: Rect, params: &SynthParams, selected: usize) {
    let items: Vec<ListItem> = ParamId::ALL
        .iter()
        .map(|&id| {
            let value = match id {
                ParamId::Waveform => params.waveform.name().to_string(),
                _ => format!("{:.3}", params.get(id)),
            };
            ListItem::new(format!("{:<22}{value:>10}", id.id()))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Params ").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow));

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}
