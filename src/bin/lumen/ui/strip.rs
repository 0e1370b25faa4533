//! LED strip widget - one colored cell per note position

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use midi_leds::color::Hsv8;

/// Render the LED frame as rows of colored cells.
pub fn render_strip(frame: &mut Frame, area: Rect, leds: &[Hsv8]) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    // Fit the strip to the available width, truncating from the top end.
    let visible = leds.len().min(area.width as usize);

    let mut spans = Vec::with_capacity(visible);
    for led in &leds[..visible] {
        let (r, g, b) = led.to_rgb();
        spans.push(Span::styled("█", Style::default().fg(Color::Rgb(r, g, b))));
    }
    let row = Line::from(spans);

    // Repeat the row to give the strip some height.
    let rows = (area.height as usize).min(3);
    let lines: Vec<Line> = (0..rows).map(|_| row.clone()).collect();

    frame.render_widget(Paragraph::new(lines), area);
}
