use regex::Regex;

use crate::EmitterError;

/// Test applied to the ```type``` field of actions.
///
/// Implemented by single [Matcher] and by collections of them: collection matches when any of its
/// matchers does, so the empty collection never matches.
pub trait TypePattern {
    fn matches(&self, action_type: &str) -> bool;
}

/// Matcher of action type: literal text or compiled regular expression.
///
/// Text given as ```&str``` or ```String``` is a pattern: it is compiled to [Matcher::Regex], which
/// matches anywhere in the type, so plain words still match as substrings. Text which is not a
/// valid regular expression falls back to [Matcher::Text], a literal substring match.
///
/// ```
/// use observable_event_emitter::{Matcher, TypePattern};
///
/// assert!(Matcher::from("ORDER").matches("ORDER_CREATED"));
/// assert!(Matcher::from("ORDER_.*").matches("ORDER_CREATED"));
/// assert!(!Matcher::from("^CREATED").matches("ORDER_CREATED"));
/// assert!(matches!(Matcher::from("ORDER("), Matcher::Text(_)));
/// assert!(Matcher::from("ORDER(").matches("ORDER(1)"));
/// ```
#[derive(Clone, Debug)]
pub enum Matcher {
    Text(String),
    Regex(Regex),
}

impl Matcher {
    /// Compile regular expression matcher
    pub fn regex(pattern: &str) -> Result<Self, EmitterError> {
        Ok(Self::Regex(Regex::new(pattern)?))
    }
}

impl TypePattern for Matcher {
    fn matches(&self, action_type: &str) -> bool {
        match self {
            Matcher::Text(text) => action_type.contains(text.as_str()),
            Matcher::Regex(regex) => regex.is_match(action_type),
        }
    }
}

impl TypePattern for [Matcher] {
    fn matches(&self, action_type: &str) -> bool {
        self.iter().any(|m| m.matches(action_type))
    }
}

impl TypePattern for Vec<Matcher> {
    fn matches(&self, action_type: &str) -> bool {
        self.as_slice().matches(action_type)
    }
}

impl From<&str> for Matcher {
    fn from(text: &str) -> Self {
        match Regex::new(text) {
            Ok(regex) => Matcher::Regex(regex),
            Err(_) => Matcher::Text(text.to_owned()),
        }
    }
}

impl From<String> for Matcher {
    fn from(text: String) -> Self {
        match Regex::new(&text) {
            Ok(regex) => Matcher::Regex(regex),
            Err(_) => Matcher::Text(text),
        }
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Matcher::Regex(regex)
    }
}
