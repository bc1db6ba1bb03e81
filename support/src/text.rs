//! Text normalization applied to stored questions and incoming queries.

/// Normalize text for indexing and comparison.
///
/// Lowercases the whole string, drops every character that is not a word
/// character (letters, digits, underscore) or whitespace, then collapses
/// whitespace runs to a single space and trims the ends. Pure and
/// deterministic; indexing and querying must both pass through here so
/// comparisons stay consistent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("¿Cuál es el estado de mi orden ORD123456?"),
            "cuál es el estado de mi orden ord123456"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("  hola   \t mundo \n "), "hola mundo");
    }

    #[test]
    fn keeps_underscores_and_digits() {
        assert_eq!(normalize("orden_123 lista!"), "orden_123 lista");
    }

    #[test]
    fn removes_punctuation_without_splitting_words() {
        // Characters are removed, not replaced, so contractions collapse
        assert_eq!(normalize("don't"), "dont");
    }

    #[test]
    fn empty_and_symbol_only_input_normalizes_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!?¡¿--"), "");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize("Mi número de orden es ORD123456");
        assert_eq!(normalize(&once), once);
    }
}
