//! Error types for the search and location flows, and the one-shot notices
//! they surface to the user.

use thiserror::Error;

/// Errors produced by a movie title search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The submitted title was empty after trimming. No request was made.
    #[error("invalid input: title is empty")]
    InvalidInput,

    /// The service answered with `"Response": "False"`.
    #[error("movie not found: {reason}")]
    NotFound {
        /// The upstream `Error` text, if any.
        reason: String,
    },

    /// The request failed, or the body could not be read as a movie record.
    #[error("transport or parse error: {reason}")]
    TransportOrParse { reason: String },
}

impl SearchError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        SearchError::TransportOrParse {
            reason: err.to_string(),
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            SearchError::InvalidInput => Notice::InvalidTitle,
            SearchError::NotFound { .. } => Notice::MovieNotFound,
            SearchError::TransportOrParse { .. } => Notice::SearchFailed,
        }
    }
}

/// Errors produced while acquiring the device location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission not granted")]
    PermissionDenied,

    /// The position read failed after permission was granted.
    #[error("location unavailable: {reason}")]
    Unavailable { reason: String },
}

impl LocationError {
    /// Only a refused permission is surfaced; a failed read is silent.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            LocationError::PermissionDenied => Some(Notice::LocationDenied),
            LocationError::Unavailable { .. } => None,
        }
    }
}

/// A modal message shown once until dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidTitle,
    LocationDenied,
    MovieNotFound,
    SearchFailed,
}

impl Notice {
    pub fn heading(&self) -> &'static str {
        match self {
            Notice::InvalidTitle => "Warning",
            Notice::LocationDenied => "Location",
            Notice::MovieNotFound | Notice::SearchFailed => "Error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::InvalidTitle => "Please enter a valid movie title.",
            Notice::LocationDenied => {
                "Location permission not granted — please grant location permission to get the location."
            }
            Notice::MovieNotFound => "Movie not found. Check the title and try again.",
            Notice::SearchFailed => "There was a problem searching for the movie. Try again later.",
        }
    }
}
