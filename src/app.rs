//! Application state and input handling.
//!
//! `App` is the single source of truth for the entire TUI. It is only mutated
//! from the main event loop — no `Arc<Mutex<>>` needed. Rendering is a pure
//! function of this state, which is what guarantees the loading spinner
//! disappears on every exit path: any terminal load event replaces the
//! `Loading` state wholesale.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::{Position, Rect};

use crate::api::types::{ApiCommand, ApiEvent, LoadError, Movie, Section};
use crate::ui;

/// The genre catalog offered by the recommendation endpoint, in the
/// backend's order. Submission preserves this order for checked entries.
pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Thriller",
    "War",
    "Western",
];

/// Blocking prompt shown when submitting with nothing checked.
pub const EMPTY_GENRES_PROMPT: &str = "Select at least one genre";

// ─── Section lifecycle ──────────────────────────────────────────────────────

/// Per-section load state. Explicit, so a section that legitimately loaded
/// zero movies stays `Loaded` and is never re-fetched by accident.
#[derive(Debug, Clone)]
pub enum SectionState {
    /// Never requested this session.
    Unloaded,
    /// Request in flight; the section shows a spinner.
    Loading,
    /// Movies rendered in response order. Replaced wholesale on re-load.
    Loaded(Vec<Movie>),
    /// Terminal until the user re-triggers the load.
    Failed(LoadError),
}

impl SectionState {
    pub fn movies(&self) -> Option<&[Movie]> {
        match self {
            SectionState::Loaded(movies) => Some(movies),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SectionState::Loading)
    }
}

// ─── Input modes ────────────────────────────────────────────────────────────

/// Which mode the UI is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation over tabs and cards.
    Browse,
    /// The genre checklist overlay is open.
    Genres,
    /// The movie detail overlay is open.
    Detail,
    /// A popup dialog (notice / help) is displayed.
    Dialog,
}

// ─── Popup types ────────────────────────────────────────────────────────────

/// Active popup overlay.
#[derive(Debug, Clone)]
pub enum Popup {
    /// A notice with a sliding animation progress (0.0 → 1.0).
    Notice {
        message: String,
        error: bool,
        slide: f32,
    },
    /// Help overlay.
    Help,
}

impl Popup {
    /// Get mutable reference to the slide progress, if applicable.
    pub fn slide_mut(&mut self) -> Option<&mut f32> {
        match self {
            Popup::Notice { slide, .. } => Some(slide),
            Popup::Help => None,
        }
    }
}

// ─── Actions produced by input handling ─────────────────────────────────────

/// Actions that the main loop should execute after processing input.
#[derive(Debug)]
pub enum AppAction {
    /// Quit the application.
    Quit,
    /// Send a command to the API worker.
    Api(ApiCommand),
    /// No-op (event was consumed but requires no further action).
    Consumed,
}

fn command_action(cmd: Option<ApiCommand>) -> AppAction {
    match cmd {
        Some(cmd) => AppAction::Api(cmd),
        None => AppAction::Consumed,
    }
}

// ─── App state ──────────────────────────────────────────────────────────────

pub struct App {
    /// The active tab. Exactly one section is visible at a time.
    pub active: Section,
    /// Per-section load state, indexed by `Section::index()`.
    pub sections: [SectionState; 4],
    /// Per-section card cursor.
    pub selected: [usize; 4],
    /// Per-section scroll offset (first visible card).
    pub scroll: [usize; 4],
    /// Current input mode.
    pub input_mode: InputMode,
    /// Movie shown in the detail overlay. Cloned from the already-fetched
    /// list — opening the detail never re-fetches.
    pub detail: Option<Movie>,
    /// Checkbox state per catalog genre.
    pub genre_checked: Vec<bool>,
    /// Cursor within the genre checklist.
    pub genre_cursor: usize,
    /// Last submitted selection, so refresh can resubmit it.
    pub last_genres: Vec<String>,
    /// Active popup overlay.
    pub active_popup: Option<Popup>,
    /// Auto-dismiss countdown for transient popups (in ticks).
    pub popup_ttl: Option<u64>,
    /// Mode restored when the popup is dismissed.
    popup_resume: InputMode,
    /// Monotonic tick counter for animations.
    pub tick_count: u64,
    /// Whether the application should keep running.
    pub running: bool,
    /// Last known terminal area; shared by rendering and mouse hit-testing.
    pub viewport: Rect,
}

impl App {
    pub fn new() -> Self {
        Self {
            active: Section::Daily,
            sections: [
                SectionState::Unloaded,
                SectionState::Unloaded,
                SectionState::Unloaded,
                SectionState::Unloaded,
            ],
            selected: [0; 4],
            scroll: [0; 4],
            input_mode: InputMode::Browse,
            detail: None,
            genre_checked: vec![false; GENRES.len()],
            genre_cursor: 0,
            last_genres: Vec::new(),
            active_popup: None,
            popup_ttl: None,
            popup_resume: InputMode::Browse,
            tick_count: 0,
            running: true,
            viewport: Rect::new(0, 0, 80, 24),
        }
    }

    /// Eager load of the daily section, issued once before the event loop —
    /// independent of any tab interaction.
    pub fn startup(&mut self) -> ApiCommand {
        self.sections[Section::Daily.index()] = SectionState::Loading;
        ApiCommand::FetchSection(Section::Daily)
    }

    // ── Section state access ────────────────────────────────────────────

    pub fn section_state(&self, section: Section) -> &SectionState {
        &self.sections[section.index()]
    }

    /// Movies of the currently active section, if loaded.
    pub fn active_movies(&self) -> Option<&[Movie]> {
        self.section_state(self.active).movies()
    }

    /// Cursor index within the active section.
    pub fn active_selected(&self) -> usize {
        self.selected[self.active.index()]
    }

    /// Scroll offset of the active section.
    pub fn active_scroll(&self) -> usize {
        self.scroll[self.active.index()]
    }

    // ── Tab switching & lazy loading ────────────────────────────────────

    /// Activate a tab. Lazy-loads hot/upcoming the first time they become
    /// active; a failed section retries on re-activation; a loaded section
    /// (even one with zero movies) never re-fetches automatically. The
    /// preference tab never auto-loads — activating it fresh opens the
    /// genre picker instead.
    pub fn select_section(&mut self, target: Section) -> Option<ApiCommand> {
        if target == self.active {
            // Idempotent no-op, except as the retry path for a failure.
            if matches!(self.sections[target.index()], SectionState::Failed(_))
                && target != Section::Preference
            {
                return self.begin_load(target);
            }
            return None;
        }

        self.active = target;
        match self.sections[target.index()] {
            SectionState::Unloaded if target == Section::Preference => {
                self.open_genre_picker();
                None
            }
            SectionState::Unloaded => self.begin_load(target),
            SectionState::Failed(_) if target != Section::Preference => self.begin_load(target),
            _ => None,
        }
    }

    /// Start (or restart) a section's load. For the preference section this
    /// resubmits the last genre selection, or opens the picker when there
    /// has been none.
    fn begin_load(&mut self, section: Section) -> Option<ApiCommand> {
        if section == Section::Preference {
            if self.last_genres.is_empty() {
                self.open_genre_picker();
                return None;
            }
            self.sections[section.index()] = SectionState::Loading;
            return Some(ApiCommand::Recommend(self.last_genres.clone()));
        }
        self.sections[section.index()] = SectionState::Loading;
        Some(ApiCommand::FetchSection(section))
    }

    // ── Genre picker ────────────────────────────────────────────────────

    pub fn open_genre_picker(&mut self) {
        self.input_mode = InputMode::Genres;
    }

    /// Read the checked genres in catalog order.
    pub fn checked_genres(&self) -> Vec<String> {
        GENRES
            .iter()
            .zip(&self.genre_checked)
            .filter(|(_, checked)| **checked)
            .map(|(name, _)| (*name).to_string())
            .collect()
    }

    /// Submit the current selection. An empty selection raises the blocking
    /// validation prompt and issues no request.
    fn submit_genres(&mut self) -> Option<ApiCommand> {
        let genres = self.checked_genres();
        if genres.is_empty() {
            self.show_blocking_popup(Popup::Notice {
                message: EMPTY_GENRES_PROMPT.to_string(),
                error: false,
                slide: 0.0,
            });
            return None;
        }
        self.last_genres = genres.clone();
        self.sections[Section::Preference.index()] = SectionState::Loading;
        self.input_mode = InputMode::Browse;
        Some(ApiCommand::Recommend(genres))
    }

    // ── Tick handling ───────────────────────────────────────────────────

    /// Called on every animation tick (~60 Hz).
    pub fn on_tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);

        // Animate popup slide-in.
        if let Some(popup) = &mut self.active_popup {
            if let Some(slide) = popup.slide_mut() {
                if *slide < 1.0 {
                    let speed = crate::config::get().notifications.slide_speed;
                    *slide = (*slide + speed).min(1.0);
                }
            }
        }

        // Auto-dismiss transient popups.
        if let Some(ttl) = &mut self.popup_ttl {
            if *ttl == 0 {
                self.dismiss_popup();
            } else {
                *ttl -= 1;
            }
        }
    }

    // ── API event handling ──────────────────────────────────────────────

    /// Apply an event from the API worker. A straggler response for a
    /// section that was re-requested simply overwrites the state — last
    /// response to resolve wins.
    pub fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::SectionLoaded { section, movies } => {
                let i = section.index();
                let len = movies.len();
                self.sections[i] = SectionState::Loaded(movies);
                self.selected[i] = self.selected[i].min(len.saturating_sub(1));
                self.scroll[i] = self.scroll[i].min(self.selected[i]);
            }
            ApiEvent::SectionFailed { section, error } => {
                self.sections[section.index()] = SectionState::Failed(error);
            }
            ApiEvent::Error(message) => {
                self.show_transient_popup(Popup::Notice {
                    message,
                    error: true,
                    slide: 0.0,
                });
            }
        }
    }

    // ── Popups ──────────────────────────────────────────────────────────

    /// Show a popup that stays until the user dismisses it.
    fn show_blocking_popup(&mut self, popup: Popup) {
        if self.input_mode != InputMode::Dialog {
            self.popup_resume = self.input_mode;
        }
        self.active_popup = Some(popup);
        self.input_mode = InputMode::Dialog;
        self.popup_ttl = None;
    }

    /// Show a popup with a timeout tuned to message severity.
    fn show_transient_popup(&mut self, popup: Popup) {
        let notif = &crate::config::get().notifications;
        let tick_ms = crate::config::get().general.tick_rate_ms.max(1);

        let duration_ms = match &popup {
            Popup::Notice { error: true, .. } => notif.error_duration_ms,
            _ => notif.info_duration_ms,
        };

        if self.input_mode != InputMode::Dialog {
            self.popup_resume = self.input_mode;
        }
        self.active_popup = Some(popup);
        self.input_mode = InputMode::Dialog;
        self.popup_ttl = Some(duration_ms / tick_ms);
    }

    fn dismiss_popup(&mut self) {
        self.active_popup = None;
        self.popup_ttl = None;
        if self.input_mode == InputMode::Dialog {
            self.input_mode = self.popup_resume;
        }
    }

    // ── Card navigation ─────────────────────────────────────────────────

    fn move_selection(&mut self, delta: i64) {
        let Some(movies) = self.active_movies() else {
            return;
        };
        if movies.is_empty() {
            return;
        }
        let len = movies.len();
        let i = self.active.index();
        let current = self.selected[i] as i64;
        self.selected[i] = (current + delta).clamp(0, len as i64 - 1) as usize;
        self.ensure_selected_visible();
    }

    /// Keep the cursor inside the rendered window.
    fn ensure_selected_visible(&mut self) {
        let content = ui::layout::screen(self.viewport).content;
        let rows = ui::layout::visible_cards(content).max(1);
        let i = self.active.index();
        if self.selected[i] < self.scroll[i] {
            self.scroll[i] = self.selected[i];
        } else if self.selected[i] >= self.scroll[i] + rows {
            self.scroll[i] = self.selected[i] + 1 - rows;
        }
    }

    /// Open the detail overlay for the selected card, reusing the
    /// already-in-memory record.
    fn open_detail(&mut self) {
        let Some(movies) = self.active_movies() else {
            return;
        };
        if let Some(movie) = movies.get(self.active_selected()) {
            self.detail = Some(movie.clone());
            self.input_mode = InputMode::Detail;
        }
    }

    fn close_detail(&mut self) {
        self.detail = None;
        self.input_mode = InputMode::Browse;
    }

    // ── Input handling ──────────────────────────────────────────────────

    /// Process a key event and return an action for the main loop.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        // Ctrl+C always quits (system convention, non-configurable).
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppAction::Quit;
        }

        match self.input_mode {
            InputMode::Browse => self.handle_browse_key(key),
            InputMode::Genres => self.handle_genres_key(key),
            InputMode::Detail => self.handle_detail_key(key),
            InputMode::Dialog => self.handle_dialog_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> AppAction {
        let kb = &crate::config::get().keys;

        match key.code {
            // ── Quit ────────────────────────────────────────────────────
            c if c == kb.quit => AppAction::Quit,

            // ── Card navigation ─────────────────────────────────────────
            c if c == kb.nav_down || c == KeyCode::Down => {
                self.move_selection(1);
                AppAction::Consumed
            }
            c if c == kb.nav_up || c == KeyCode::Up => {
                self.move_selection(-1);
                AppAction::Consumed
            }
            c if c == kb.jump_top => {
                self.move_selection(i64::MIN / 2);
                AppAction::Consumed
            }
            c if c == kb.jump_bottom => {
                self.move_selection(i64::MAX / 2);
                AppAction::Consumed
            }

            // ── Tab switching ───────────────────────────────────────────
            c if c == kb.next_tab || c == KeyCode::Right => {
                let next = Section::ALL[(self.active.index() + 1) % Section::ALL.len()];
                command_action(self.select_section(next))
            }
            c if c == kb.prev_tab || c == KeyCode::Left => {
                let prev =
                    Section::ALL[(self.active.index() + Section::ALL.len() - 1) % Section::ALL.len()];
                command_action(self.select_section(prev))
            }
            KeyCode::Char(c @ '1'..='4') => {
                let target = Section::ALL[c as usize - '1' as usize];
                command_action(self.select_section(target))
            }

            // ── Cards & sections ────────────────────────────────────────
            c if c == kb.open_detail => {
                self.open_detail();
                AppAction::Consumed
            }
            c if c == kb.genres => {
                // Jump straight to the preference tab and its picker.
                self.active = Section::Preference;
                self.open_genre_picker();
                AppAction::Consumed
            }
            c if c == kb.refresh => {
                if self.section_state(self.active).is_loading() {
                    AppAction::Consumed
                } else {
                    command_action(self.begin_load(self.active))
                }
            }

            // ── Help ────────────────────────────────────────────────────
            c if c == kb.help => {
                self.show_blocking_popup(Popup::Help);
                AppAction::Consumed
            }

            _ => AppAction::Consumed,
        }
    }

    fn handle_genres_key(&mut self, key: KeyEvent) -> AppAction {
        let kb = &crate::config::get().keys;

        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Browse;
                AppAction::Consumed
            }
            c if c == kb.nav_down || c == KeyCode::Down => {
                self.genre_cursor = (self.genre_cursor + 1).min(GENRES.len() - 1);
                AppAction::Consumed
            }
            c if c == kb.nav_up || c == KeyCode::Up => {
                self.genre_cursor = self.genre_cursor.saturating_sub(1);
                AppAction::Consumed
            }
            KeyCode::Char(' ') => {
                self.genre_checked[self.genre_cursor] = !self.genre_checked[self.genre_cursor];
                AppAction::Consumed
            }
            KeyCode::Enter => command_action(self.submit_genres()),
            _ => AppAction::Consumed,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.close_detail();
                AppAction::Consumed
            }
            _ => AppAction::Consumed,
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> AppAction {
        let help = crate::config::get().keys.help;
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.dismiss_popup();
                AppAction::Consumed
            }
            // The help key toggles the help overlay closed again.
            c if c == help => {
                self.dismiss_popup();
                AppAction::Consumed
            }
            _ => AppAction::Consumed,
        }
    }

    // ── Mouse handling ──────────────────────────────────────────────────

    /// Process a left-button press. Hit-testing shares the pure layout
    /// geometry with the renderer, so click targets match what is drawn.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> AppAction {
        let pos = Position::new(mouse.column, mouse.row);

        match self.input_mode {
            InputMode::Detail => {
                // A click on the backdrop closes the modal; a click inside
                // the content area does not.
                if !ui::detail::modal_rect(self.viewport).contains(pos) {
                    self.close_detail();
                }
                AppAction::Consumed
            }
            InputMode::Genres => {
                let overlay = ui::genre_select::overlay_rect(self.viewport);
                if overlay.contains(pos) {
                    if let Some(row) = ui::genre_select::genre_at(overlay, pos.y) {
                        self.genre_cursor = row;
                        self.genre_checked[row] = !self.genre_checked[row];
                    }
                } else {
                    self.input_mode = InputMode::Browse;
                }
                AppAction::Consumed
            }
            InputMode::Dialog => {
                self.dismiss_popup();
                AppAction::Consumed
            }
            InputMode::Browse => {
                let layout = ui::layout::screen(self.viewport);
                if layout.tabs.contains(pos) {
                    if let Some(section) = ui::tab_bar::section_at(layout.tabs, pos.x) {
                        return command_action(self.select_section(section));
                    }
                    return AppAction::Consumed;
                }
                if layout.content.contains(pos) {
                    if let Some(index) =
                        ui::layout::card_at(layout.content, pos.y, self.active_scroll())
                    {
                        let len = self.active_movies().map_or(0, <[Movie]>::len);
                        if index < len {
                            self.selected[self.active.index()] = index;
                            self.open_detail();
                        }
                    }
                }
                AppAction::Consumed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn movie(title: &str) -> Movie {
        Movie {
            id: None,
            title: title.to_string(),
            poster: None,
            rating: None,
            release_date: None,
            overview: None,
            source: None,
        }
    }

    fn app() -> App {
        crate::config::ensure_test_defaults();
        App::new()
    }

    fn loaded(app: &mut App, section: Section, titles: &[&str]) {
        app.handle_api_event(ApiEvent::SectionLoaded {
            section,
            movies: titles.iter().map(|t| movie(t)).collect(),
        });
    }

    #[test]
    fn startup_eagerly_loads_daily() {
        let mut app = app();
        let cmd = app.startup();
        assert!(matches!(cmd, ApiCommand::FetchSection(Section::Daily)));
        assert!(app.section_state(Section::Daily).is_loading());
    }

    #[test]
    fn hot_tab_fetches_exactly_once() {
        let mut app = app();
        // First activation issues the fetch.
        let first = app.select_section(Section::Hot);
        assert!(matches!(first, Some(ApiCommand::FetchSection(Section::Hot))));

        loaded(&mut app, Section::Hot, &["Heat", "Ronin"]);

        // Navigating away and back must not re-fetch.
        app.select_section(Section::Daily);
        let second = app.select_section(Section::Hot);
        assert!(second.is_none());

        // Re-selecting the already-active tab is a no-op too.
        assert!(app.select_section(Section::Hot).is_none());
    }

    #[test]
    fn activation_while_loading_does_not_duplicate_the_request() {
        let mut app = app();
        assert!(app.select_section(Section::Upcoming).is_some());
        app.select_section(Section::Daily);
        assert!(app.select_section(Section::Upcoming).is_none());
    }

    #[test]
    fn loaded_section_with_zero_movies_is_not_refetched() {
        let mut app = app();
        app.select_section(Section::Hot);
        loaded(&mut app, Section::Hot, &[]);

        app.select_section(Section::Daily);
        assert!(app.select_section(Section::Hot).is_none());
        assert!(app.section_state(Section::Hot).movies().is_some());
    }

    #[test]
    fn failed_section_retries_on_reactivation() {
        let mut app = app();
        app.select_section(Section::Hot);
        app.handle_api_event(ApiEvent::SectionFailed {
            section: Section::Hot,
            error: LoadError::Network,
        });

        // Re-selecting the active failed tab is the retry path.
        let retry = app.select_section(Section::Hot);
        assert!(matches!(retry, Some(ApiCommand::FetchSection(Section::Hot))));
        assert!(app.section_state(Section::Hot).is_loading());
    }

    #[test]
    fn failure_replaces_the_spinner_and_cards() {
        let mut app = app();
        app.select_section(Section::Hot);
        app.handle_api_event(ApiEvent::SectionFailed {
            section: Section::Hot,
            error: LoadError::Backend,
        });
        match app.section_state(Section::Hot) {
            SectionState::Failed(e) => assert_eq!(*e, LoadError::Backend),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(!app.section_state(Section::Hot).is_loading());
        assert!(app.section_state(Section::Hot).movies().is_none());
    }

    #[test]
    fn load_replaces_prior_content_entirely() {
        let mut app = app();
        loaded(&mut app, Section::Daily, &["Old A", "Old B", "Old C"]);
        loaded(&mut app, Section::Daily, &["New"]);
        let titles: Vec<&str> = app
            .section_state(Section::Daily)
            .movies()
            .unwrap()
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, ["New"]);
        // Cursor clamped into the shorter list.
        assert_eq!(app.selected[Section::Daily.index()], 0);
    }

    #[test]
    fn preference_tab_never_auto_loads() {
        let mut app = app();
        let cmd = app.select_section(Section::Preference);
        assert!(cmd.is_none());
        // It opens the picker instead.
        assert_eq!(app.input_mode, InputMode::Genres);
        assert!(matches!(
            app.section_state(Section::Preference),
            SectionState::Unloaded
        ));
    }

    #[test]
    fn empty_genre_submit_blocks_with_prompt_and_issues_nothing() {
        let mut app = app();
        app.select_section(Section::Preference);
        let action = app.handle_key(key(KeyCode::Enter));
        assert!(matches!(action, AppAction::Consumed));
        assert!(matches!(
            app.active_popup,
            Some(Popup::Notice { ref message, .. }) if message == EMPTY_GENRES_PROMPT
        ));
        assert!(matches!(
            app.section_state(Section::Preference),
            SectionState::Unloaded
        ));

        // Dismissing the prompt returns to the picker.
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Genres);
    }

    #[test]
    fn genre_submit_posts_checked_genres_in_catalog_order() {
        let mut app = app();
        app.select_section(Section::Preference);

        let action_idx = GENRES.iter().position(|g| *g == "Action").unwrap();
        let comedy_idx = GENRES.iter().position(|g| *g == "Comedy").unwrap();
        // Check Comedy first, then Action — order of checking must not matter.
        app.genre_checked[comedy_idx] = true;
        app.genre_checked[action_idx] = true;

        let action = app.handle_key(key(KeyCode::Enter));
        match action {
            AppAction::Api(ApiCommand::Recommend(genres)) => {
                assert_eq!(genres, ["Action", "Comedy"]);
            }
            other => panic!("expected Recommend, got {other:?}"),
        }
        assert!(app.section_state(Section::Preference).is_loading());
        assert_eq!(app.input_mode, InputMode::Browse);
        assert_eq!(app.last_genres, ["Action", "Comedy"]);
    }

    #[test]
    fn refresh_resubmits_last_genres() {
        let mut app = app();
        app.select_section(Section::Preference);
        app.genre_checked[0] = true;
        app.handle_key(key(KeyCode::Enter));
        loaded(&mut app, Section::Preference, &["Heat"]);

        let kb_refresh = crate::config::get().keys.refresh;
        let action = app.handle_key(key(kb_refresh));
        assert!(matches!(
            action,
            AppAction::Api(ApiCommand::Recommend(ref genres)) if genres == &["Action"]
        ));
    }

    #[test]
    fn detail_opens_from_memory_and_closes() {
        let mut app = app();
        loaded(&mut app, Section::Daily, &["Heat", "Ronin"]);
        app.move_selection(1);
        let action = app.handle_key(key(KeyCode::Enter));
        assert!(matches!(action, AppAction::Consumed));
        assert_eq!(app.input_mode, InputMode::Detail);
        assert_eq!(app.detail.as_ref().unwrap().title, "Ronin");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Browse);
        assert!(app.detail.is_none());
    }

    #[test]
    fn backdrop_click_closes_detail_but_content_click_does_not() {
        let mut app = app();
        loaded(&mut app, Section::Daily, &["Heat"]);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Detail);

        let modal = ui::detail::modal_rect(app.viewport);
        let inside = MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: modal.x + modal.width / 2,
            row: modal.y + modal.height / 2,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(inside);
        assert_eq!(app.input_mode, InputMode::Detail);

        let outside = MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 0,
            row: app.viewport.height - 1,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(outside);
        assert_eq!(app.input_mode, InputMode::Browse);
    }

    #[test]
    fn straggler_response_overwrites_section_state() {
        let mut app = app();
        app.select_section(Section::Preference);
        app.genre_checked[0] = true;
        app.handle_key(key(KeyCode::Enter));

        // Two racing submissions: the later event wins, whatever it is.
        loaded(&mut app, Section::Preference, &["First"]);
        loaded(&mut app, Section::Preference, &["Second", "Third"]);
        let titles: Vec<&str> = app
            .section_state(Section::Preference)
            .movies()
            .unwrap()
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, ["Second", "Third"]);
    }

    #[test]
    fn worker_error_becomes_transient_popup() {
        let mut app = app();
        app.handle_api_event(ApiEvent::Error("backend unreachable".into()));
        assert!(matches!(
            app.active_popup,
            Some(Popup::Notice { error: true, .. })
        ));
        assert!(app.popup_ttl.is_some());
        assert_eq!(app.input_mode, InputMode::Dialog);
    }
}
