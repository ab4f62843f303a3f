use std::time::Instant;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use folio_background::BackgroundState;
use folio_config::{Config, PreferenceStore};
use folio_core::Theme;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration.
    config: Config,
    /// Persisted preferences (the theme).
    prefs: PreferenceStore,
    /// Current theme.
    theme: Theme,
    /// Show the key help line.
    show_help: bool,
    /// Animated backdrop.
    background: BackgroundState,
}

impl App {
    /// Construct a new instance of [`App`] using the saved theme.
    pub fn new(config: Config, prefs: PreferenceStore) -> Self {
        let theme = prefs.theme();
        let background = BackgroundState::new(config.field.clone(), config.palette_for(theme));
        tracing::info!(%theme, "starting");
        Self {
            running: false,
            show_help: config.show_help,
            config,
            prefs,
            theme,
            background,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let interval = self.config.frame_interval();
        while self.running {
            let frame_start = Instant::now();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(frame_start + interval)?;
        }
        Ok(())
    }

    /// Renders the backdrop and the text overlay.
    fn render(&mut self, frame: &mut Frame) {
        self.background.render(frame);

        let palette = *self.background.palette();
        let accent = palette.accent_primary.to_color();
        let muted = palette.text_secondary.to_color();

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        if let Some(title) = &self.config.title {
            let title = Paragraph::new(title.as_str())
                .style(Style::new().fg(palette.text_primary.to_color()).bold())
                .alignment(Alignment::Center);
            frame.render_widget(title, chunks[1]);
        }

        if self.show_help {
            let help = Line::from(vec![
                "q".bold().fg(accent),
                " quit  ".fg(muted),
                "t".bold().fg(accent),
                " toggle theme  ".fg(muted),
                "h".bold().fg(accent),
                " hide help".fg(muted),
            ])
            .centered();
            frame.render_widget(help, chunks[3]);
        }
    }

    /// Reads crossterm events until the next frame is due.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            self.on_event(event::read()?);
        }
        Ok(())
    }

    /// Dispatches a single event. Resizes are picked up from the frame size
    /// on the next draw.
    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            Event::FocusLost => self.background.pointer_left(),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Feeds pointer movement and clicks to the backdrop.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.background.pointer_moved(mouse.column, mouse.row)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.background.clicked(mouse.column, mouse.row)
            }
            _ => {}
        }
    }

    /// Switch theme, persist it, and rebuild the backdrop in the new colors.
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Err(err) = self.prefs.set_theme(self.theme) {
            tracing::warn!("failed to save theme preference: {err:#}");
        }
        self.background.set_palette(self.config.palette_for(self.theme));
        tracing::info!(theme = %self.theme, "theme changed");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use folio_core::{Bounds, Palette};
    use ratatui::{buffer::Buffer, layout::Rect};

    fn app() -> App {
        App::new(Config::default(), PreferenceStore::in_memory())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    /// An app whose backdrop has drawn one frame, so the field exists.
    fn drawn_app() -> App {
        let mut app = app();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        app.background.render_area(area, &mut buf);
        app
    }

    fn transient_count(app: &App) -> usize {
        app.background.field().map_or(0, |field| field.transient_count())
    }

    fn pointer(app: &App) -> Option<(f64, f64)> {
        app.background.field().and_then(|field| field.pointer())
    }

    #[test]
    fn test_left_click_spawns_burst() {
        let mut app = drawn_app();
        app.on_event(mouse(MouseEventKind::Down(MouseButton::Right), 10, 10));
        assert_eq!(transient_count(&app), 0);

        app.on_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        assert_eq!(transient_count(&app), 15);
    }

    #[test]
    fn test_pointer_follows_mouse_until_focus_lost() {
        let mut app = drawn_app();
        app.on_event(mouse(MouseEventKind::Moved, 12, 7));
        assert_eq!(pointer(&app), Some(Bounds::cell_center(12, 7)));

        app.on_event(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 20));
        assert_eq!(pointer(&app), Some(Bounds::cell_center(40, 20)));
        // The drag covered far more than the trail threshold
        assert_eq!(transient_count(&app), 3);

        app.on_event(Event::FocusLost);
        assert_eq!(pointer(&app), None);
    }

    #[test]
    fn test_resize_event_is_ignored() {
        let mut app = drawn_app();
        app.on_event(Event::Resize(10, 10));
        let field = app.background.field().unwrap();
        assert_eq!(field.bounds(), Bounds::from_cells(100, 30).unwrap());
    }

    #[test]
    fn test_starts_with_saved_theme() -> color_eyre::Result<()> {
        let mut prefs = PreferenceStore::in_memory();
        prefs.set_theme(Theme::Dark)?;
        let app = App::new(Config::default(), prefs);
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.background.palette(), &Palette::dark());
        Ok(())
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut app = app();
        assert_eq!(app.theme, Theme::Light);

        app.on_key_event(press(KeyCode::Char('t')));
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.prefs.theme(), Theme::Dark);
        assert_eq!(app.background.palette(), &Palette::dark());

        app.on_key_event(press(KeyCode::Char('t')));
        assert_eq!(app.prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.running = true;
        app.on_key_event(press(KeyCode::Char('q')));
        assert!(!app.running);

        app.running = true;
        app.on_key_event(KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        });
        assert!(!app.running);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        assert!(app.show_help);
        app.on_key_event(press(KeyCode::Char('h')));
        assert!(!app.show_help);
    }
}
