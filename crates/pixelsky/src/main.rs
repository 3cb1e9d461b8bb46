mod frame_clock;
mod logging;
mod view;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
};
use pixelsky_background::{PixelArtBackground, PixelCanvas};
use pixelsky_config::{Config, ConfigError};
use pixelsky_core::{Palette, SharedTheme, SharedViewport, ThemeMode};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::Paragraph,
};
use tracing::{info, warn};

use crate::frame_clock::FrameClock;

/// Longest wait for input while no frame is due.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Set to any value to force `reduced_motion` on.
const REDUCED_MOTION_ENV: &str = "PIXELSKY_REDUCED_MOTION";

type Background = PixelArtBackground<PixelCanvas, SharedTheme, SharedViewport, FrameClock>;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;
    let mut config = Config::load()?;
    if std::env::var_os(REDUCED_MOTION_ENV).is_some() {
        config.reduced_motion = true;
    }

    let terminal = ratatui::init();
    execute!(io::stdout(), EnableFocusChange)?;
    let result = run(terminal, config);
    disable_focus_reporting(&mut io::stdout());
    ratatui::restore();
    result
}

/// Turn focus reporting back off. Failing here must not hide `run`'s result.
fn disable_focus_reporting(out: &mut impl io::Write) {
    if let Err(e) = execute!(out, DisableFocusChange) {
        warn!(error = %e, "failed to disable focus reporting");
    }
}

fn run(terminal: DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    let size = terminal.size()?;
    App::new(config, size.width, size.height)?.run(terminal)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Where `s` writes the configuration.
    config_path: Option<PathBuf>,
    /// Current theme selection mode.
    theme_mode: ThemeMode,
    /// Resolved theme read by the background.
    theme: SharedTheme,
    /// Surface size read by the background.
    viewport: SharedViewport,
    background: Background,
    /// Paused from the keyboard.
    paused: bool,
    /// Whether the terminal window has focus.
    focused: bool,
    show_help: bool,
    /// Transient message shown in the help line.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`] for a `cols` x `rows` terminal.
    pub fn new(config: Config, cols: u16, rows: u16) -> color_eyre::Result<Self> {
        let palette: Palette = config.palette.to_palette()?;
        let theme_mode = config.theme;
        let theme = SharedTheme::new(theme_mode.resolve());
        let viewport = SharedViewport::new(view::viewport_for(cols, rows, config.pixels_per_cell));

        if config.reduced_motion {
            info!("reduced motion requested, background stays still");
        }
        let background = PixelArtBackground::new(
            (!config.reduced_motion).then(PixelCanvas::default),
            theme.clone(),
            viewport.clone(),
            FrameClock::new(config.fps),
            palette,
        );
        info!(
            cols,
            rows,
            fps = config.fps,
            mode = theme_mode.label(),
            "pixelsky started"
        );

        Ok(Self {
            running: false,
            show_help: config.show_help,
            config,
            config_path: pixelsky_config::config_path().ok(),
            theme_mode,
            theme,
            viewport,
            background,
            paused: false,
            focused: true,
            status: None,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.step(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Advance timers and deliver a due frame to the background.
    fn step(&mut self, now: Instant) {
        self.refresh_theme();
        self.background.poll(now);
        if let Some(handle) = self.background.scheduler_mut().take_due(now) {
            self.background.on_frame(handle);
        }
    }

    /// Resolve the theme mode and publish the result if it changed.
    fn refresh_theme(&mut self) {
        let theme = self.theme_mode.resolve();
        if self.theme.set(theme) {
            info!(
                theme = theme.as_str(),
                mode = self.theme_mode.label(),
                "theme changed"
            );
        }
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let lines = self.background_lines(area.width, area.height);
        frame.render_widget(Paragraph::new(lines), area);

        if self.show_help {
            let [_, help_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            frame.render_widget(self.help_line(), help_area);
        }
    }

    /// The background as `cols` x `rows` cells, or a plain backdrop when
    /// the renderer has no surface.
    fn background_lines(&self, cols: u16, rows: u16) -> Vec<Line<'static>> {
        let backdrop = self.background.palette().colors(self.theme.get()).backdrop;
        match self.background.surface() {
            Some(canvas) => {
                view::canvas_lines(canvas, cols, rows, self.config.pixels_per_cell, backdrop)
            }
            None => view::backdrop_lines(cols, rows, backdrop),
        }
    }

    fn help_line(&self) -> Line<'static> {
        let mut spans = vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "t".bold(),
            format!(" theme: {}  ", self.theme_mode.label()).dark_gray(),
            "p".bold(),
            (if self.paused { " resume  " } else { " pause  " }).dark_gray(),
            "r".bold(),
            " regenerate  ".dark_gray(),
            "s".bold(),
            " save  ".dark_gray(),
            "h".bold(),
            " hide help".dark_gray(),
        ];
        if let Some(status) = &self.status {
            spans.push(format!("  {status}").italic());
        }
        Line::from(spans).centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the time until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .background
            .scheduler()
            .time_until_due(Instant::now())
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
        if event::poll(timeout)? {
            self.on_event(event::read()?, Instant::now());
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, now),
            Event::Resize(cols, rows) => self.on_resize(cols, rows, now),
            Event::FocusLost => {
                self.focused = false;
                self.sync_visibility();
            }
            Event::FocusGained => {
                self.focused = true;
                self.sync_visibility();
            }
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, now: Instant) {
        self.status = None;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.cycle_theme_mode(),
            (_, KeyCode::Char('p')) => self.toggle_pause(),
            (_, KeyCode::Char('r')) => self.background.notify_resize(now),
            (_, KeyCode::Char('s')) => self.save_config(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16, now: Instant) {
        self.viewport
            .set(view::viewport_for(cols, rows, self.config.pixels_per_cell));
        self.background.notify_resize(now);
    }

    /// Cycle through light, dark and automatic theme selection.
    fn cycle_theme_mode(&mut self) {
        self.theme_mode = self.theme_mode.next();
        self.refresh_theme();
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.sync_visibility();
    }

    /// The background only runs while focused and not paused.
    fn sync_visibility(&mut self) {
        self.background.set_visible(self.focused && !self.paused);
    }

    /// Persist the current theme mode and help setting.
    fn save_config(&mut self) {
        self.config.theme = self.theme_mode;
        self.config.show_help = self.show_help;
        let saved = match &self.config_path {
            Some(path) => self.config.save_to(path),
            None => Err(ConfigError::NoConfigDir),
        };
        self.status = Some(match saved {
            Ok(()) => {
                info!("configuration saved");
                "saved".to_string()
            }
            Err(e) => {
                warn!(error = %e, "failed to save configuration");
                format!("save failed: {e}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
