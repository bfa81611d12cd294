//! Display-ready projection of [`App`] state.
//!
//! [`ScreenView::from_app`] is a pure function of the session state; the
//! renderer in [`crate::ui`] only lays out what it is given. Keeping the
//! decisions here (which panels exist, what the poster shows, where the map
//! is centered) lets them be tested without a terminal.

use crate::app::App;
use crate::errors::Notice;
use crate::models::{LocationFix, MovieRecord, Poster};

pub const BANNER: &str = "Movie Finder";
pub const INPUT_PLACEHOLDER: &str = "Type a movie title";
pub const SUBMIT_HINT: &str = "[Enter] Search Movie";
pub const MAP_HEADING: &str = "Your current location";
pub const MARKER_LABEL: &str = "Your Location";
pub const NO_COVER: &str = "Cover not available";
pub const SEARCHING: &str = "Searching...";

/// Fixed viewport span of the map panel, in degrees.
pub const LATITUDE_DELTA: f64 = 0.0922;
pub const LONGITUDE_DELTA: f64 = 0.0421;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub banner: &'static str,
    pub input: InputView,
    pub submit_hint: &'static str,
    pub movie: Option<MoviePanel>,
    pub map: Option<MapView>,
    pub status: Option<&'static str>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub text: String,
    /// True when `text` is the placeholder rather than user input.
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviePanel {
    pub title: String,
    /// `(label, value)` rows in display order.
    pub lines: Vec<(&'static str, String)>,
    pub poster: PosterView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterView {
    Image { url: String },
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub position: LocationFix,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: LocationFix,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    pub markers: Vec<MapMarker>,
}

impl ScreenView {
    pub fn from_app(app: &App) -> Self {
        let input = if app.query.is_empty() {
            InputView {
                text: INPUT_PLACEHOLDER.to_string(),
                is_placeholder: true,
            }
        } else {
            InputView {
                text: app.query.clone(),
                is_placeholder: false,
            }
        };

        Self {
            banner: BANNER,
            input,
            submit_hint: SUBMIT_HINT,
            movie: app.movie.as_ref().map(MoviePanel::from_record),
            map: app.location.map(MapView::centered_on),
            status: app.is_searching().then_some(SEARCHING),
            notice: app.notice(),
        }
    }
}

impl MoviePanel {
    pub fn from_record(record: &MovieRecord) -> Self {
        let poster = match record.poster() {
            Poster::Image(url) => PosterView::Image {
                url: url.to_string(),
            },
            Poster::Unavailable => PosterView::Placeholder(NO_COVER),
        };

        Self {
            title: record.title.clone(),
            lines: vec![
                ("Year", record.year.clone()),
                ("Genre", record.genre.clone()),
                ("Director", record.director.clone()),
                ("Awards", record.awards.clone()),
            ],
            poster,
        }
    }
}

impl MapView {
    /// A fixed-span viewport on `fix` with a single marker on it.
    pub fn centered_on(fix: LocationFix) -> Self {
        Self {
            center: fix,
            latitude_delta: LATITUDE_DELTA,
            longitude_delta: LONGITUDE_DELTA,
            markers: vec![MapMarker {
                position: fix,
                label: MARKER_LABEL,
            }],
        }
    }

    /// Longitude range covered by the viewport.
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.longitude_delta / 2.0;
        [self.center.longitude - half, self.center.longitude + half]
    }

    /// Latitude range covered by the viewport.
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.latitude_delta / 2.0;
        [self.center.latitude - half, self.center.latitude + half]
    }
}
