//! Wildcard patterns that catch common single-edit typos.
//!
//! A [`SearchPattern`] is a run of literal segments with a wildcard between
//! each pair. The wildcard matches zero or more characters, and a pattern as a
//! whole matches anywhere inside the searched text, the same contract as
//! `LIKE '%…%'`.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Wildcard marker used when a pattern is rendered for display or SQL
pub const WILDCARD: char = '%';

/// Terms longer than this also get a pattern for each missing-character position
const MISSING_CHAR_MIN_LEN: usize = 6;

/// Terms longer than this also get a pattern for each extra-character position
const EXTRA_CHAR_MIN_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchPattern {
    segments: Vec<String>,
}

impl SearchPattern {
    /// A pattern without wildcards; matches plain substring containment.
    pub fn literal(text: &str) -> Self {
        Self::from_segments(vec![text.to_string()])
    }

    /// Build a pattern from literal segments, a wildcard sitting between each pair.
    pub fn from_segments(segments: Vec<String>) -> Self {
        // Leading, trailing and doubled wildcards add nothing under substring semantics
        let segments = segments.into_iter().filter(|s| !s.is_empty()).collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.len() > 1
    }

    /// True when the segments occur in `text` in order.
    ///
    /// `text` is expected to be lowercased already.
    pub fn matches(&self, text: &str) -> bool {
        let mut rest = text;
        for segment in &self.segments {
            match rest.find(segment.as_str()) {
                Some(idx) => rest = &rest[idx + segment.len()..],
                None => return false,
            }
        }
        true
    }

    /// Render as a SQL `LIKE` operand, escaping with `\`.
    pub fn to_like(&self) -> String {
        let mut like = String::from("%");
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                like.push('%');
            }
            for c in segment.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    like.push('\\');
                }
                like.push(c);
            }
        }
        like.push('%');
        like
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{WILDCARD}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Deduplicated typo patterns for one term, in a stable order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: BTreeSet<SearchPattern>,
}

impl PatternSet {
    /// Generate the typo patterns for a lowercase term.
    pub fn for_term(term: &str) -> Self {
        let chars: Vec<char> = term.chars().collect();
        let len = chars.len();
        let mut patterns = BTreeSet::new();

        let text = |range: &[char]| range.iter().collect::<String>();

        // Recipe spelling has a character the query is missing
        if len >= MISSING_CHAR_MIN_LEN {
            for i in 0..=len {
                patterns.insert(SearchPattern::from_segments(vec![
                    text(&chars[..i]),
                    text(&chars[i..]),
                ]));
            }
        }

        // Query has a character the recipe spelling does not
        if len >= EXTRA_CHAR_MIN_LEN {
            for i in 0..len {
                patterns.insert(SearchPattern::from_segments(vec![
                    text(&chars[..i]),
                    text(&chars[i + 1..]),
                ]));
            }
        }

        // Two adjacent characters typed in the wrong order
        for i in 0..len.saturating_sub(1) {
            let mut swapped = chars.clone();
            swapped.swap(i, i + 1);
            patterns.insert(SearchPattern::literal(&text(&swapped)));
        }

        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, pattern: &SearchPattern) -> bool {
        self.patterns.contains(pattern)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, SearchPattern> {
        self.patterns.iter()
    }
}

impl IntoIterator for PatternSet {
    type Item = SearchPattern;
    type IntoIter = btree_set::IntoIter<SearchPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a SearchPattern;
    type IntoIter = btree_set::Iter<'a, SearchPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}
