//! Query tokenization.

use std::cmp::Ordering;

/// Folds a single character to lowercase without changing the character count.
///
/// Candidates and tokens are folded per character so that indices computed on
/// the folded text stay valid for the original text.
pub fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// One whitespace-delimited query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryToken {
    text: String,
    chars: Vec<char>,
}

impl QueryToken {
    fn new(text: &str, case_sensitive: bool) -> Self {
        let chars: Vec<char> = if case_sensitive {
            text.chars().collect()
        } else {
            text.chars().map(fold_case).collect()
        };
        Self {
            text: chars.iter().collect(),
            chars,
        }
    }

    /// Token text as it is matched.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Token characters.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false for tokens produced by [`Query::parse`].
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// A parsed query: tokens ordered for matching plus case sensitivity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    tokens: Vec<QueryToken>,
    case_sensitive: bool,
}

impl Query {
    /// Parses `raw` into tokens.
    ///
    /// Matching is case-sensitive when the query contains an uppercase
    /// character. Tokens are ordered longest first, ties broken
    /// lexicographically, because a token cannot claim a span an earlier
    /// token already holds.
    pub fn parse(raw: &str) -> Self {
        let case_sensitive = raw.chars().any(char::is_uppercase);
        let mut tokens: Vec<QueryToken> = raw
            .split_whitespace()
            .map(|t| QueryToken::new(t, case_sensitive))
            .collect();
        tokens.sort_by(compare_tokens);

        Self {
            raw: raw.to_string(),
            tokens,
            case_sensitive,
        }
    }

    /// The query as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tokens in matching order.
    pub fn tokens(&self) -> &[QueryToken] {
        &self.tokens
    }

    /// Whether candidates are compared without case folding.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// True when the query has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn compare_tokens(a: &QueryToken, b: &QueryToken) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.text.cmp(&b.text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_texts(query: &Query) -> Vec<&str> {
        query.tokens().iter().map(QueryToken::as_str).collect()
    }

    #[test]
    fn test_tokens_sorted_by_length_then_text() {
        let query = Query::parse("gd entity  ab background");
        assert_eq!(token_texts(&query), vec!["background", "entity", "ab", "gd"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let query = Query::parse("gd gd x");
        assert_eq!(token_texts(&query), vec!["gd", "gd", "x"]);
    }

    #[test]
    fn test_case_sensitivity() {
        assert!(!Query::parse("entity gd").is_case_sensitive());
        assert!(!Query::parse("///gd_2.x").is_case_sensitive());
        assert!(Query::parse("Entity gd").is_case_sensitive());

        let query = Query::parse("HudMenu");
        assert_eq!(token_texts(&query), vec!["HudMenu"]);
    }

    #[test]
    fn test_whitespace_splitting() {
        let query = Query::parse("  push\tbackground\n");
        assert_eq!(token_texts(&query), vec!["background", "push"]);
        assert_eq!(query.raw(), "  push\tbackground\n");
    }

    #[test]
    fn test_empty_query() {
        assert!(Query::parse("").is_empty());
        assert!(Query::parse("   ").is_empty());
        assert!(Query::default().is_empty());
    }

    #[test]
    fn test_fold_case_keeps_length() {
        assert_eq!(fold_case('A'), 'a');
        assert_eq!(fold_case('_'), '_');
        // Expands to two characters under full lowercasing.
        assert_eq!(fold_case('\u{130}'), 'i');
    }
}
