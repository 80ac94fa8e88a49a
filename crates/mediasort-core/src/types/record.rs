use std::fmt;

use serde::Serialize;

use crate::parser::extractor::{DEFAULT_EPISODE, DEFAULT_SEASON, Extraction};

/// The result of running one filename through the inference pipeline.
///
/// Built once and never mutated. Unresolved fields are not errors: an empty
/// series name, season [`DEFAULT_SEASON`] and episode [`DEFAULT_EPISODE`]
/// mark what the pipeline could not find, and callers decide what to do
/// with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InferenceRecord {
    series_name: String,
    season: u32,
    episode: u32,
    extension: String,
    cleaned_text: String,
}

impl InferenceRecord {
    /// Bundles an extraction with the filename's extension and cleaned text.
    #[must_use]
    pub fn new(extraction: Extraction, extension: impl Into<String>, cleaned_text: String) -> Self {
        Self {
            series_name: extraction.series_name,
            season: extraction.season.max(DEFAULT_SEASON),
            episode: extraction.episode,
            extension: extension.into(),
            cleaned_text,
        }
    }

    /// Inferred series name; empty when unresolved.
    pub fn series_name(&self) -> &str {
        &self.series_name
    }

    /// Season number, always at least 1.
    pub fn season(&self) -> u32 {
        self.season
    }

    /// Episode number, 0 when unresolved.
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Extension of the original filename, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The normalized text the fields were extracted from.
    pub fn cleaned_text(&self) -> &str {
        &self.cleaned_text
    }

    /// Returns `true` if a series name was found.
    #[must_use]
    pub fn has_series_name(&self) -> bool {
        !self.series_name.is_empty()
    }

    /// Returns `true` if an episode number was found.
    #[must_use]
    pub fn has_episode(&self) -> bool {
        self.episode != DEFAULT_EPISODE
    }

    /// Season/episode tag such as `S01E05`.
    pub fn episode_tag(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.episode)
    }

    /// Emphasised series name alone, as used for movie notifications.
    pub fn title_display(&self) -> String {
        format!("*{}*", self.series_name)
    }
}

/// Canonical display form, `*Name* - **S01E05**`.
///
/// Notification messages embed this string verbatim.
impl fmt::Display for InferenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "*{}* - **S{:02}E{:02}**",
            self.series_name, self.season, self.episode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, season: u32, episode: u32) -> InferenceRecord {
        InferenceRecord::new(
            Extraction {
                series_name: name.into(),
                season,
                episode,
            },
            "mkv",
            format!("{name} cleaned"),
        )
    }

    #[test]
    fn display_pads_to_two_digits() {
        assert_eq!(record("Edens Zero", 2, 1).to_string(), "*Edens Zero* - **S02E01**");
        assert_eq!(record("One Piece", 1, 1010).to_string(), "*One Piece* - **S01E1010**");
    }

    #[test]
    fn display_unresolved_record() {
        assert_eq!(record("", 1, 0).to_string(), "** - **S01E00**");
    }

    #[test]
    fn season_is_never_zero() {
        assert_eq!(record("Show", 0, 3).season(), 1);
    }

    #[test]
    fn accessors_and_flags() {
        let r = record("Bleach Kai", 1, 1);
        assert_eq!(r.series_name(), "Bleach Kai");
        assert_eq!(r.extension(), "mkv");
        assert_eq!(r.cleaned_text(), "Bleach Kai cleaned");
        assert_eq!(r.episode_tag(), "S01E01");
        assert_eq!(r.title_display(), "*Bleach Kai*");
        assert!(r.has_series_name());
        assert!(r.has_episode());

        let r = record("", 1, 0);
        assert!(!r.has_series_name());
        assert!(!r.has_episode());
    }

    #[test]
    fn record_serializes_field_names() {
        let json = serde_json::to_value(record("Komi san wa Komyushou Desu", 1, 5)).unwrap();
        assert_eq!(json["series_name"], "Komi san wa Komyushou Desu");
        assert_eq!(json["season"], 1);
        assert_eq!(json["episode"], 5);
        assert_eq!(json["extension"], "mkv");
    }

    #[test]
    fn serialized_season_is_clamped() {
        let json = serde_json::to_value(record("Show", 0, 3)).unwrap();
        assert_eq!(json["season"], 1);
    }
}
