//! TUI module for lumen
//!
//! Renders the engine's output frame as a terminal LED strip and keeps
//! the engine ticking off the wall clock.

mod status;
mod strip;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use midi_leds::color::MidiColors;
use midi_leds::engine::{LedMessage, MidiLeds};
use midi_leds::NUM_CHANNELS;

use status::render_status;
use strip::render_strip;

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for note commands
    command_rx: Consumer<LedMessage>,
    /// The LED engine being driven
    leds: MidiLeds<MidiColors>,
    /// Wall-clock origin for tick timestamps
    started: Instant,
    /// Whether the app should quit
    should_quit: bool,
}

impl UiApp {
    pub fn new(command_rx: Consumer<LedMessage>, leds: MidiLeds<MidiColors>) -> Self {
        Self {
            command_rx,
            leds,
            started: Instant::now(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            // Apply queued note commands, then advance the engine.
            self.leds.drain(&mut self.command_rx);
            let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
            self.leds.tick(now_ms);

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                // Fade everything out across all channels.
                for channel in 0..NUM_CHANNELS as u8 {
                    self.leds.all_leds_off(channel);
                }
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: status bar, LED strip, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(4),    // LED strip
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_status(frame, chunks[0], &self.leds, self.started.elapsed());

        let strip_block = Block::default().title(" LEDs ").borders(Borders::ALL);
        let strip_inner = strip_block.inner(chunks[1]);
        frame.render_widget(strip_block, chunks[1]);
        render_strip(frame, strip_inner, self.leds.leds());

        let help = ratatui::widgets::Paragraph::new(" [Q] Quit  [C] All LEDs off")
            .style(ratatui::style::Style::default().fg(ratatui::style::Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
