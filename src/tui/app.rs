use crate::tui::search::SearchState;
use crate::tui::table::TableState;
use crate::tui::ui;
use crate::view::{DogView, LoadState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::warn;

pub struct App {
    // Data
    pub view: DogView,

    // Sub-states
    pub search: SearchState,
    pub table: TableState,

    pub status_message: Option<String>,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(view: DogView) -> Self {
        Self {
            view,
            search: SearchState::default(),
            table: TableState::default(),
            status_message: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        self.view.mount();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.tick();
                last_tick = Instant::now();
            }

            if self.should_quit {
                self.view.unmount();
                return Ok(());
            }
        }
    }

    /// Apply a finished fetch.
    pub fn tick(&mut self) {
        if self.view.poll() {
            if let LoadState::Failed(reason) = self.view.state() {
                self.status_message = Some(format!("Could not load images: {}", reason));
            }
            let total = self.visible_count();
            self.table.clamp(total);
        }
    }

    /// Push the search box text into the view.
    fn apply_query(&mut self) {
        self.view.set_query(self.search.query.clone());
        let total = self.visible_count();
        self.table.clamp(total);
    }

    pub fn visible_count(&self) -> usize {
        self.view.rows().len()
    }

    /// Image URL of the highlighted row.
    pub fn selected_url(&self) -> Option<String> {
        let selected = self.table.selected?;
        self.view
            .rows()
            .get(selected)
            .map(|row| row.image_url.to_string())
    }

    fn open_selected(&mut self) {
        let Some(url) = self.selected_url() else {
            return;
        };
        self.status_message = Some(match open::that(&url) {
            Ok(()) => format!("Opened {}", url),
            Err(e) => {
                warn!(error = %e, %url, "could not open browser");
                format!("Open failed: {}", e)
            }
        });
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.search.focused && !self.search.query.is_empty() {
                    if self.search.clear() {
                        self.apply_query();
                    }
                } else if self.search.focused {
                    self.search.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        if self.search.focused {
            self.handle_search_key(key);
        } else {
            self.handle_table_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let changed = match key.code {
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => {
                self.search.move_left();
                false
            }
            KeyCode::Right => {
                self.search.move_right();
                false
            }
            KeyCode::Home => {
                self.search.home();
                false
            }
            KeyCode::End => {
                self.search.end();
                false
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.search.focused = false;
                false
            }
            _ => false,
        };
        if changed {
            self.apply_query();
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.visible_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(total),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::PageUp => self.table.page_up(total),
            KeyCode::PageDown => self.table.page_down(total),
            KeyCode::Home => self.table.select_first(total),
            KeyCode::End => self.table.select_last(total),
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.search.focused = true;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.focused = true;
                self.search.end();
                self.search.insert(c);
                self.apply_query();
            }

            _ => {}
        }
    }
}
