//! Status bar - active voice count and uptime

use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use midi_leds::color::MidiColors;
use midi_leds::engine::MidiLeds;

/// Render the status bar: voice usage and elapsed time.
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    leds: &MidiLeds<MidiColors>,
    elapsed: Duration,
) {
    let line = Line::from(vec![
        Span::styled(" lumen ", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            " voices {:>2}/{}  ",
            leds.active_voices(),
            leds.voice_count()
        )),
        Span::raw(format!(
            "notes {}-{}  ",
            leds.note_min(),
            leds.note_max()
        )),
        Span::styled(
            format!("{:>6.1}s", elapsed.as_secs_f64()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
