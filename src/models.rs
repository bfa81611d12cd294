use serde::Deserialize;

/// Upstream marker for a field that is intentionally empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// A movie as returned by a successful title lookup.
///
/// Field values are kept verbatim from the response body, including the
/// `"N/A"` poster sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Awards")]
    pub awards: String,
    #[serde(rename = "Poster")]
    pub poster_url: String,
}

/// Poster of a [`MovieRecord`], with the sentinel resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poster<'a> {
    Image(&'a str),
    Unavailable,
}

impl MovieRecord {
    pub fn poster(&self) -> Poster<'_> {
        if self.poster_url == NOT_AVAILABLE {
            Poster::Unavailable
        } else {
            Poster::Image(&self.poster_url)
        }
    }
}

/// Single latitude/longitude reading, in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

// The "Response" field discriminates the two documented shapes. Anything
// else fails to deserialize.
#[derive(Debug, Deserialize)]
#[serde(tag = "Response")]
pub enum OmdbEnvelope {
    #[serde(rename = "True")]
    Found(MovieRecord),
    #[serde(rename = "False")]
    NotFound {
        #[serde(rename = "Error", default)]
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_sentinel_is_unavailable() {
        let record = MovieRecord {
            title: "Primer".into(),
            year: "2004".into(),
            genre: "Drama, Sci-Fi, Thriller".into(),
            director: "Shane Carruth".into(),
            awards: "2 wins & 3 nominations".into(),
            poster_url: "N/A".into(),
        };
        assert_eq!(record.poster(), Poster::Unavailable);
    }

    #[test]
    fn poster_url_is_image() {
        let record = MovieRecord {
            title: "Heat".into(),
            year: "1995".into(),
            genre: "Action, Crime, Drama".into(),
            director: "Michael Mann".into(),
            awards: "14 nominations".into(),
            poster_url: "https://img.example/heat.jpg".into(),
        };
        assert_eq!(record.poster(), Poster::Image("https://img.example/heat.jpg"));
    }

    #[test]
    fn envelope_ignores_extra_fields() {
        let body = r#"{"Title":"Heat","Year":"1995","Rated":"R","Genre":"Crime",
            "Director":"Michael Mann","Awards":"14 nominations","Poster":"N/A",
            "Ratings":[{"Source":"IMDb","Value":"8.3/10"}],"Response":"True"}"#;
        let envelope: OmdbEnvelope = serde_json::from_str(body).unwrap();
        match envelope {
            OmdbEnvelope::Found(record) => assert_eq!(record.director, "Michael Mann"),
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn envelope_not_found_carries_error() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let envelope: OmdbEnvelope = serde_json::from_str(body).unwrap();
        match envelope {
            OmdbEnvelope::NotFound { error } => assert_eq!(error, "Movie not found!"),
            other => panic!("unexpected envelope: {other:?}"),
        }
    }
}
