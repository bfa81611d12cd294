use crate::api::validate_title;
use crate::errors::{LocationError, Notice, SearchError};
use crate::events::Event;
use crate::models::{LocationFix, MovieRecord};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// A search the main loop should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub title: String,
}

/// Session state. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct App {
    /// Text in the input field, stored exactly as typed.
    pub query: String,
    pub movie: Option<MovieRecord>,
    /// Set at most once per session.
    pub location: Option<LocationFix>,
    pub should_quit: bool,

    notices: VecDeque<Notice>,
    latest_seq: u64,
    searching: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// The notice currently shown, if any.
    pub fn notice(&self) -> Option<Notice> {
        self.notices.front().copied()
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Applies an event; returns a search to spawn when the user submitted one.
    pub fn handle_event(&mut self, event: Event) -> Option<SearchRequest> {
        match event {
            // Ticks only drive redraws.
            Event::Tick => {}
            Event::TerminalLost => {
                warn!("Terminal input lost; shutting down.");
                self.should_quit = true;
            }
            Event::Input(key) => return self.handle_key(key),
            Event::SearchFinished { seq, result } => self.apply_search_result(seq, result),
            Event::LocationResolved(result) => self.apply_location_result(result),
        }
        None
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') = key.code {
                self.should_quit = true;
            }
            return None;
        }

        // A notice is modal until dismissed.
        if self.notice().is_some() {
            if let KeyCode::Enter | KeyCode::Esc = key.code {
                self.dismiss_notice();
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => return self.submit(),
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Char(c) => self.query.push(c),
            _ => {}
        }
        None
    }

    /// Validates the query and, if it is usable, hands out a new search.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        if let Err(e) = validate_title(&self.query) {
            debug!("Rejected submission: {}", e);
            self.push_notice(e.notice());
            return None;
        }

        self.latest_seq += 1;
        self.searching = true;
        info!("Search #{} submitted for {:?}", self.latest_seq, self.query);
        Some(SearchRequest {
            seq: self.latest_seq,
            title: self.query.clone(),
        })
    }

    /// Records the outcome of search `seq`.
    ///
    /// Completions older than the newest submission are dropped. A success
    /// replaces the movie outright; a failure leaves it untouched.
    pub fn apply_search_result(&mut self, seq: u64, result: Result<MovieRecord, SearchError>) {
        if seq < self.latest_seq {
            debug!("Dropping stale result of search #{} (latest #{})", seq, self.latest_seq);
            return;
        }
        self.searching = false;

        match result {
            Ok(record) => self.movie = Some(record),
            Err(e) => {
                warn!("Search #{} failed: {}", seq, e);
                self.push_notice(e.notice());
            }
        }
    }

    pub fn apply_location_result(&mut self, result: Result<LocationFix, LocationError>) {
        match result {
            Ok(fix) => {
                if self.location.is_none() {
                    self.location = Some(fix);
                }
            }
            Err(e) => {
                if let Some(notice) = e.notice() {
                    self.push_notice(notice);
                }
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_key(press(KeyCode::Char(c))), None);
        }
    }

    fn record(title: &str, poster: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: "1979".to_string(),
            genre: "Horror, Sci-Fi".to_string(),
            director: "Ridley Scott".to_string(),
            awards: "Won 1 Oscar".to_string(),
            poster_url: poster.to_string(),
        }
    }

    #[test]
    fn typing_edits_query_untrimmed() {
        let mut app = App::new();
        type_text(&mut app, "  Alien ");
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.query, "  Alien");
    }

    #[test]
    fn whitespace_submission_shows_notice_without_search() {
        let mut app = App::new();
        type_text(&mut app, "   ");

        assert_eq!(app.handle_key(press(KeyCode::Enter)), None);
        assert_eq!(app.notice(), Some(Notice::InvalidTitle));
        assert!(!app.is_searching());
    }

    #[test]
    fn submission_issues_raw_title_with_increasing_seq() {
        let mut app = App::new();
        type_text(&mut app, " Alien");

        let first = app.handle_key(press(KeyCode::Enter)).unwrap();
        let second = app.submit().unwrap();
        assert_eq!(first.title, " Alien");
        assert!(second.seq > first.seq);
        assert!(app.is_searching());
        assert_eq!(app.query, " Alien");
    }

    #[test]
    fn success_replaces_previous_record() {
        let mut app = App::new();
        type_text(&mut app, "Alien");

        let req = app.submit().unwrap();
        app.apply_search_result(req.seq, Ok(record("Alien", "N/A")));
        let req = app.submit().unwrap();
        app.apply_search_result(req.seq, Ok(record("Aliens", "https://img.example/aliens.jpg")));

        assert_eq!(
            app.movie,
            Some(record("Aliens", "https://img.example/aliens.jpg"))
        );
        assert!(!app.is_searching());
    }

    #[test]
    fn failures_keep_previous_record() {
        let mut app = App::new();
        type_text(&mut app, "Alien");
        let req = app.submit().unwrap();
        app.apply_search_result(req.seq, Ok(record("Alien", "N/A")));

        let req = app.submit().unwrap();
        app.apply_search_result(
            req.seq,
            Err(SearchError::NotFound {
                reason: "Movie not found!".into(),
            }),
        );
        assert_eq!(app.movie, Some(record("Alien", "N/A")));
        assert_eq!(app.notice(), Some(Notice::MovieNotFound));

        app.dismiss_notice();
        let req = app.submit().unwrap();
        app.apply_search_result(req.seq, Err(SearchError::transport("timed out")));
        assert_eq!(app.movie, Some(record("Alien", "N/A")));
        assert_eq!(app.notice(), Some(Notice::SearchFailed));
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut app = App::new();
        type_text(&mut app, "Alien");
        let older = app.submit().unwrap();
        let newer = app.submit().unwrap();

        app.apply_search_result(newer.seq, Ok(record("Aliens", "N/A")));
        app.apply_search_result(older.seq, Ok(record("Alien", "N/A")));
        assert_eq!(app.movie.as_ref().map(|m| m.title.as_str()), Some("Aliens"));

        app.apply_search_result(older.seq, Err(SearchError::transport("late")));
        assert_eq!(app.notice(), None);
    }

    #[test]
    fn search_does_not_touch_location() {
        let mut app = App::new();
        app.apply_location_result(Ok(LocationFix::new(10.0, 20.0)));
        type_text(&mut app, "Alien");
        let req = app.submit().unwrap();
        app.apply_search_result(req.seq, Err(SearchError::transport("offline")));

        assert_eq!(app.location, Some(LocationFix::new(10.0, 20.0)));
    }

    #[test]
    fn location_is_set_once() {
        let mut app = App::new();
        app.apply_location_result(Ok(LocationFix::new(10.0, 20.0)));
        app.apply_location_result(Ok(LocationFix::new(30.0, 40.0)));
        assert_eq!(app.location, Some(LocationFix::new(10.0, 20.0)));
    }

    #[test]
    fn denied_permission_notifies_and_leaves_location_empty() {
        let mut app = App::new();
        app.apply_location_result(Err(LocationError::PermissionDenied));
        assert_eq!(app.location, None);
        assert_eq!(app.notice(), Some(Notice::LocationDenied));

        // Search still works afterwards.
        app.dismiss_notice();
        type_text(&mut app, "Alien");
        assert!(app.submit().is_some());
    }

    #[test]
    fn unavailable_position_is_silent() {
        let mut app = App::new();
        app.apply_location_result(Err(LocationError::Unavailable {
            reason: "no fix".into(),
        }));
        assert_eq!(app.location, None);
        assert_eq!(app.notice(), None);
    }

    #[test]
    fn notice_is_modal_until_dismissed() {
        let mut app = App::new();
        app.submit();
        assert_eq!(app.notice(), Some(Notice::InvalidTitle));

        app.handle_key(press(KeyCode::Char('x')));
        assert_eq!(app.query, "");
        assert!(!app.should_quit);

        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.notice(), None);
        assert!(!app.should_quit);
    }

    #[test]
    fn notices_queue_in_arrival_order() {
        let mut app = App::new();
        app.apply_location_result(Err(LocationError::PermissionDenied));
        app.submit();

        assert_eq!(app.notice(), Some(Notice::LocationDenied));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.notice(), Some(Notice::InvalidTitle));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.notice(), None);
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = App::new();
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn handle_event_routes_completions() {
        let mut app = App::new();
        type_text(&mut app, "Alien");
        let req = app
            .handle_event(Event::Input(press(KeyCode::Enter)))
            .unwrap();

        assert_eq!(
            app.handle_event(Event::SearchFinished {
                seq: req.seq,
                result: Ok(record("Alien", "N/A")),
            }),
            None
        );
        app.handle_event(Event::LocationResolved(Ok(LocationFix::new(1.0, 2.0))));
        assert_eq!(app.handle_event(Event::Tick), None);

        assert!(app.movie.is_some());
        assert_eq!(app.location, Some(LocationFix::new(1.0, 2.0)));
        assert!(!app.should_quit);
    }

    #[test]
    fn lost_terminal_quits() {
        let mut app = App::new();
        type_text(&mut app, "Alien");

        assert_eq!(app.handle_event(Event::TerminalLost), None);
        assert!(app.should_quit);
    }

    #[test]
    fn lost_terminal_quits_even_with_notice_open() {
        let mut app = App::new();
        app.apply_location_result(Err(LocationError::PermissionDenied));

        app.handle_event(Event::TerminalLost);
        assert!(app.should_quit);
    }
}
