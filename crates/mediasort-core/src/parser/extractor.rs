use tracing::debug;

use crate::error::Result;
use crate::parser::rules::{PatternRule, RuleChain};

/// Season assumed when the cleaned text carries no `SxxExx` marker.
///
/// Releases without a season marker are single-season or unnumbered, and
/// the library files those under season 1. There is no season 0.
pub const DEFAULT_SEASON: u32 = 1;

/// Episode used when no episode number can be found at all.
pub const DEFAULT_EPISODE: u32 = 0;

/// Series name used when neither name rule matches.
pub const UNRESOLVED_NAME: &str = "";

/// Fields derived from cleaned text. Each one falls back independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Text before the first season marker or number, trimmed.
    pub series_name: String,
    /// Season number, never below [`DEFAULT_SEASON`].
    pub season: u32,
    /// Episode number.
    pub episode: u32,
}

/// Derives series name, season and episode from normalized text.
///
/// Season-qualified rules always run before the bare-number fallbacks, so an
/// explicit `S02E05` wins over any other number in the text.
///
/// Digit classes are ASCII `[0-9]`. A non-ASCII decimal digit such as `٣`
/// is title text here: it never ends the series name and is never read as a
/// season or episode, unlike a Unicode-aware `\d` pattern.
#[derive(Debug, Clone)]
pub struct Extractor {
    name_rules: RuleChain,
    season_rules: RuleChain,
    episode_rules: RuleChain,
}

impl Extractor {
    /// Constructs an extractor with pre-compiled rule chains.
    ///
    /// # Errors
    ///
    /// Returns `MediasortError::Regex` if any rule fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            name_rules: RuleChain::new(vec![
                PatternRule::new(
                    "name-before-season-marker",
                    r"(.+?)(S[0-9]{1,2}E[0-9]{1,2}|S[0-9]{1,2})",
                )?,
                PatternRule::new("name-before-number", r"(.+?)([0-9]{1,3})")?,
            ]),
            season_rules: RuleChain::new(vec![PatternRule::new(
                "season-episode-marker",
                r"S([0-9]{1,2})E[0-9]{1,2}",
            )?]),
            episode_rules: RuleChain::new(vec![
                PatternRule::new("season-episode-marker", r"S[0-9]{1,2}E([0-9]{1,2})")?,
                PatternRule::new("bare-number", r"\b([0-9]{1,4})\b")?,
            ]),
        })
    }

    /// Series name rules, in evaluation order.
    pub fn name_rules(&self) -> &RuleChain {
        &self.name_rules
    }

    /// Season rules, in evaluation order.
    pub fn season_rules(&self) -> &RuleChain {
        &self.season_rules
    }

    /// Episode rules, in evaluation order.
    pub fn episode_rules(&self) -> &RuleChain {
        &self.episode_rules
    }

    /// Extracts all three fields. Never fails.
    pub fn extract(&self, cleaned: &str) -> Extraction {
        Extraction {
            series_name: self.extract_series_name(cleaned),
            season: self.extract_season(cleaned),
            episode: self.extract_episode(cleaned),
        }
    }

    /// Text before the first season marker, else before the first 1-3 digit
    /// run, trimmed. Empty when neither applies.
    pub fn extract_series_name(&self, cleaned: &str) -> String {
        match self.name_rules.first_capture(cleaned) {
            Some((rule, name)) => {
                debug!(rule, name, "series name matched");
                name.trim().to_string()
            }
            None => UNRESOLVED_NAME.to_string(),
        }
    }

    /// Season from an `SxxExx` marker. A bare `Sxx` is not enough, and a
    /// zero season falls back to [`DEFAULT_SEASON`].
    pub fn extract_season(&self, cleaned: &str) -> u32 {
        self.season_rules
            .first_number(cleaned)
            .map(|(_, season)| season)
            .filter(|&season| season >= DEFAULT_SEASON)
            .unwrap_or(DEFAULT_SEASON)
    }

    /// Episode from an `SxxExx` marker, else the first standalone 1-4 digit
    /// number. That fallback can pick up a numeral belonging to the title.
    pub fn extract_episode(&self, cleaned: &str) -> u32 {
        match self.episode_rules.first_number(cleaned) {
            Some((rule, episode)) => {
                debug!(rule, episode, "episode matched");
                episode
            }
            None => DEFAULT_EPISODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new().unwrap()
    }

    #[test]
    fn rule_chains_keep_marker_rules_first() {
        let e = extractor();
        let names: Vec<_> = e.episode_rules().rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["season-episode-marker", "bare-number"]);
        let names: Vec<_> = e.name_rules().rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["name-before-season-marker", "name-before-number"]);
        assert_eq!(e.season_rules().rules().len(), 1);
    }

    #[test]
    fn season_episode_marker() {
        let r = extractor().extract("Edens Zero S02E01");
        assert_eq!(r.series_name, "Edens Zero");
        assert_eq!(r.season, 2);
        assert_eq!(r.episode, 1);
    }

    #[test]
    fn bare_number_fallback() {
        let r = extractor().extract("Dragon Ball 101 Bulma et Son Goku");
        assert_eq!(r.series_name, "Dragon Ball");
        assert_eq!(r.season, DEFAULT_SEASON);
        assert_eq!(r.episode, 101);
    }

    #[test]
    fn marker_beats_earlier_bare_number() {
        let r = extractor().extract("Mob Psycho 100 S03E07");
        assert_eq!(r.season, 3);
        assert_eq!(r.episode, 7);
        assert_eq!(r.series_name, "Mob Psycho 100");
    }

    #[test]
    fn season_only_marker_sets_name_but_not_season() {
        let r = extractor().extract("Golden Kamuy S3 07");
        assert_eq!(r.series_name, "Golden Kamuy");
        assert_eq!(r.season, DEFAULT_SEASON);
        assert_eq!(r.episode, 7);
    }

    #[test]
    fn season_zero_falls_back_to_default() {
        let r = extractor().extract("Oshi no Ko S00E02");
        assert_eq!(r.season, DEFAULT_SEASON);
        assert_eq!(r.episode, 2);
    }

    #[test]
    fn markers_are_case_sensitive() {
        let r = extractor().extract("show s01e04");
        assert_eq!(r.season, DEFAULT_SEASON);
        assert_eq!(r.episode, DEFAULT_EPISODE);
        assert_eq!(r.series_name, "show s");
    }

    #[test]
    fn bare_number_must_stand_alone() {
        let e = extractor();
        assert_eq!(e.extract_episode("Part2 of 3"), 3);
        assert_eq!(e.extract_episode("12345 only"), DEFAULT_EPISODE);
        assert_eq!(e.extract_episode("One Piece 1010"), 1010);
    }

    #[test]
    fn name_capture_is_lazy_and_trimmed() {
        let e = extractor();
        assert_eq!(e.extract_series_name("One Piece 1010"), "One Piece");
        // lazy group needs at least one character before the digits
        assert_eq!(e.extract_series_name("01 Title"), "0");
    }

    #[test]
    fn no_digits_is_unresolved() {
        let r = extractor().extract("Just A Title");
        assert_eq!(r.series_name, UNRESOLVED_NAME);
        assert_eq!(r.season, DEFAULT_SEASON);
        assert_eq!(r.episode, DEFAULT_EPISODE);
    }

    #[test]
    fn empty_text_is_unresolved() {
        let r = extractor().extract("");
        assert_eq!(
            r,
            Extraction {
                series_name: String::new(),
                season: DEFAULT_SEASON,
                episode: DEFAULT_EPISODE,
            }
        );
    }

    #[test]
    fn non_ascii_digits_are_not_numbers() {
        let r = extractor().extract("Chou Kadou Girl ⅙ Amazing Stranger ٣");
        assert_eq!(r.series_name, UNRESOLVED_NAME);
        assert_eq!(r.episode, DEFAULT_EPISODE);
    }

    #[test]
    fn non_ascii_digit_stays_in_the_name() {
        let r = extractor().extract("Show ٣ 12");
        assert_eq!(r.series_name, "Show ٣");
        assert_eq!(r.season, DEFAULT_SEASON);
        assert_eq!(r.episode, 12);
    }
}
