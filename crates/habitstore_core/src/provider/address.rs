//! Resource locator matching for the habit store.
//!
//! # Responsibility
//! - Map opaque locators onto collection/item operation scopes.
//! - Build canonical locators for both forms.
//!
//! # Invariants
//! - Exactly two locator forms exist: `<authority>/habits` and
//!   `<authority>/habits/<id>` with a non-negative integer id.
//! - The match table is owned by the matcher instance; there is no global
//!   registration state.

/// Operation scope resolved from a locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// The whole habit collection.
    Collection,
    /// A single habit row addressed by store-assigned id.
    Item(i64),
}

/// Type tag for the habit collection form.
pub const CONTENT_LIST_TYPE: &str = "collection-of-habit";

/// Type tag for the single-habit item form.
pub const CONTENT_ITEM_TYPE: &str = "single-habit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Number,
}

#[derive(Debug, Clone, Copy)]
enum MatchCode {
    Habits,
    HabitId,
}

/// Locator match table, built once at store-façade construction.
///
/// Patterns are fixed path shapes under a single authority; a numeric
/// wildcard segment captures the item id.
#[derive(Debug, Clone)]
pub struct AddressMatcher {
    authority: String,
    patterns: Vec<(&'static [Segment], MatchCode)>,
}

const HABITS_PATTERN: &[Segment] = &[Segment::Literal(crate::contract::PATH_HABITS)];
const HABIT_ID_PATTERN: &[Segment] = &[
    Segment::Literal(crate::contract::PATH_HABITS),
    Segment::Number,
];

impl AddressMatcher {
    /// Builds the match table for the given authority.
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            patterns: vec![
                (HABITS_PATTERN, MatchCode::Habits),
                (HABIT_ID_PATTERN, MatchCode::HabitId),
            ],
        }
    }

    /// Returns the authority this matcher serves.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Resolves a locator to an operation scope.
    ///
    /// Returns `None` for any locator outside the two supported forms,
    /// including malformed or negative item ids.
    pub fn match_locator(&self, locator: &str) -> Option<AddressKind> {
        let path = locator.strip_prefix(self.authority.as_str())?;
        let path = path.strip_prefix('/')?;
        let segments: Vec<&str> = path.split('/').collect();

        for (pattern, code) in &self.patterns {
            if let Some(captured) = match_pattern(pattern, &segments) {
                return Some(match code {
                    MatchCode::Habits => AddressKind::Collection,
                    // The numeric wildcard guarantees an id was captured.
                    MatchCode::HabitId => AddressKind::Item(captured?),
                });
            }
        }

        None
    }

    /// Builds the collection-form locator.
    pub fn collection_locator(&self) -> String {
        format!("{}/{}", self.authority, crate::contract::PATH_HABITS)
    }

    /// Builds the item-form locator for a store-assigned id.
    pub fn item_locator(&self, id: i64) -> String {
        format!("{}/{}/{id}", self.authority, crate::contract::PATH_HABITS)
    }
}

/// Matches path segments against a pattern, capturing the numeric wildcard.
///
/// Returns `None` when the shape does not match; `Some(None)` for a match
/// without a numeric segment; `Some(Some(id))` for a match that captured one.
fn match_pattern(pattern: &[Segment], segments: &[&str]) -> Option<Option<i64>> {
    if pattern.len() != segments.len() {
        return None;
    }

    let mut captured = None;
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected {
            Segment::Literal(literal) => {
                if literal != actual {
                    return None;
                }
            }
            Segment::Number => {
                // Reject signs, leading '+', and anything non-decimal so a
                // malformed id falls through to the unsupported-address path.
                if actual.is_empty() || !actual.bytes().all(|byte| byte.is_ascii_digit()) {
                    return None;
                }
                captured = Some(actual.parse::<i64>().ok()?);
            }
        }
    }

    Some(captured)
}

#[cfg(test)]
mod tests {
    use super::{AddressKind, AddressMatcher};
    use crate::contract::AUTHORITY;

    fn matcher() -> AddressMatcher {
        AddressMatcher::new(AUTHORITY)
    }

    #[test]
    fn collection_form_matches() {
        assert_eq!(
            matcher().match_locator("habitstore/habits"),
            Some(AddressKind::Collection)
        );
    }

    #[test]
    fn item_form_captures_id() {
        assert_eq!(
            matcher().match_locator("habitstore/habits/42"),
            Some(AddressKind::Item(42))
        );
    }

    #[test]
    fn unknown_paths_and_authorities_do_not_match() {
        let matcher = matcher();
        assert_eq!(matcher.match_locator("habitstore/staff"), None);
        assert_eq!(matcher.match_locator("otherapp/habits"), None);
        assert_eq!(matcher.match_locator("habitstore/habits/3/extra"), None);
        assert_eq!(matcher.match_locator("habitstore"), None);
    }

    #[test]
    fn malformed_ids_do_not_match() {
        let matcher = matcher();
        assert_eq!(matcher.match_locator("habitstore/habits/abc"), None);
        assert_eq!(matcher.match_locator("habitstore/habits/-1"), None);
        assert_eq!(matcher.match_locator("habitstore/habits/"), None);
        assert_eq!(matcher.match_locator("habitstore/habits/1.5"), None);
    }

    #[test]
    fn locator_builders_agree_with_the_matcher() {
        let matcher = matcher();
        assert_eq!(
            matcher.match_locator(&matcher.collection_locator()),
            Some(AddressKind::Collection)
        );
        assert_eq!(
            matcher.match_locator(&matcher.item_locator(7)),
            Some(AddressKind::Item(7))
        );
    }

    #[test]
    fn built_locators_carry_the_matcher_authority() {
        let matcher = matcher();
        assert_eq!(matcher.authority(), AUTHORITY);

        let prefix = format!("{}/", matcher.authority());
        assert!(matcher.collection_locator().starts_with(&prefix));
        assert!(matcher.item_locator(7).starts_with(&prefix));
    }
}
