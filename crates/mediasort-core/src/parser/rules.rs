//! # Ordered Pattern Rules
//!
//! A [`PatternRule`] is one regex with a single meaningful capture group.
//! A [`RuleChain`] tries its rules in declaration order and the first rule
//! that captures wins. Rules stay separate objects so each one can be
//! exercised on its own.

use regex::Regex;

use crate::error::{MediasortError, Result};

/// A named regex whose capture group 1 holds the extracted value.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: &'static str,
    pattern: Regex,
}

impl PatternRule {
    /// Compiles a rule.
    ///
    /// # Errors
    ///
    /// Returns `MediasortError::Regex` if the pattern does not compile and
    /// `MediasortError::MissingCapture` if it has no capture group 1.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)?;
        if pattern.captures_len() < 2 {
            return Err(MediasortError::MissingCapture { rule: name });
        }
        Ok(Self { name, pattern })
    }

    /// Rule name, reported in debug output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns capture group 1 of the leftmost match.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Returns capture group 1 of the leftmost match parsed as a number.
    pub fn capture_number(&self, text: &str) -> Option<u32> {
        self.capture(text).and_then(|digits| digits.parse().ok())
    }
}

/// Rules evaluated in order; first match wins.
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Vec<PatternRule>,
}

impl RuleChain {
    /// Builds a chain from rules in priority order.
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// First capture among the rules, with the name of the rule that produced it.
    pub fn first_capture<'t>(&self, text: &'t str) -> Option<(&'static str, &'t str)> {
        self.rules
            .iter()
            .find_map(|rule| rule.capture(text).map(|value| (rule.name(), value)))
    }

    /// First numeric capture among the rules. A capture that does not parse
    /// counts as no match and evaluation moves on to the next rule.
    pub fn first_number(&self, text: &str) -> Option<(&'static str, u32)> {
        self.rules
            .iter()
            .find_map(|rule| rule.capture_number(text).map(|value| (rule.name(), value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_without_capture_is_rejected() {
        let err = PatternRule::new("bare", r"S\d+").unwrap_err();
        assert!(matches!(err, MediasortError::MissingCapture { rule: "bare" }));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(matches!(
            PatternRule::new("broken", r"(\d"),
            Err(MediasortError::Regex(_))
        ));
    }

    #[test]
    fn capture_returns_group_one_of_leftmost_match() {
        let rule = PatternRule::new("digits", r"([0-9]+)").unwrap();
        assert_eq!(rule.capture("ab 12 cd 34"), Some("12"));
        assert_eq!(rule.capture("none"), None);
        assert_eq!(rule.capture_number("ab 12 cd 34"), Some(12));
    }

    #[test]
    fn capture_number_rejects_overflow() {
        let rule = PatternRule::new("digits", r"([0-9]+)").unwrap();
        assert_eq!(rule.capture_number("99999999999999999999"), None);
    }

    #[test]
    fn chain_uses_first_matching_rule_in_declaration_order() {
        let chain = RuleChain::new(vec![
            PatternRule::new("marker", r"E([0-9]+)").unwrap(),
            PatternRule::new("bare", r"([0-9]+)").unwrap(),
        ]);

        assert_eq!(chain.first_capture("7 E12"), Some(("marker", "12")));
        assert_eq!(chain.first_capture("7 12"), Some(("bare", "7")));
        assert_eq!(chain.first_capture("none"), None);
        assert_eq!(chain.first_number("x E03"), Some(("marker", 3)));
    }

    #[test]
    fn chain_skips_unparsable_capture() {
        let chain = RuleChain::new(vec![
            PatternRule::new("huge", r"([0-9]{20,})").unwrap(),
            PatternRule::new("small", r"\b([0-9]{1,2})\b").unwrap(),
        ]);
        assert_eq!(
            chain.first_number("99999999999999999999 07"),
            Some(("small", 7))
        );
    }

    #[test]
    fn empty_chain_never_matches() {
        let chain = RuleChain::default();
        assert!(chain.rules().is_empty());
        assert_eq!(chain.first_capture("anything 1"), None);
    }
}
