//! Entity extraction from raw query text.
//!
//! Both predicates run on the raw query, never on normalized text: the
//! normalizer lowercases and strips `@`/`.`, which would make these patterns
//! unmatchable.

/// Order ids are "ORD" followed by exactly six digits.
const ORDER_ID_PATTERN: &str = r"ORD\d{6}\b";

/// Standard email address pattern.
const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Extract the first order-id token from the text.
pub fn extract_order_id(text: &str) -> Option<String> {
    let re = regex_lite::Regex::new(ORDER_ID_PATTERN).ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}

/// Extract the first email address from the text.
pub fn extract_email(text: &str) -> Option<String> {
    let re = regex_lite::Regex::new(EMAIL_PATTERN).ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_order_id_inside_sentence() {
        assert_eq!(
            extract_order_id("Mi número de orden es ORD123456"),
            Some("ORD123456".to_string())
        );
    }

    #[test]
    fn five_digit_order_id_does_not_match() {
        assert_eq!(extract_order_id("ORD12345"), None);
    }

    #[test]
    fn seven_digit_run_does_not_match() {
        assert_eq!(extract_order_id("ORD1234567"), None);
    }

    #[test]
    fn lowercase_order_id_does_not_match() {
        assert_eq!(extract_order_id("mi orden es ord123456"), None);
    }

    #[test]
    fn first_order_id_wins() {
        assert_eq!(
            extract_order_id("ORD000001 y también ORD000002"),
            Some("ORD000001".to_string())
        );
    }

    #[test]
    fn finds_email_inside_sentence() {
        assert_eq!(
            extract_email("Mi correo es usuario@ejemplo.com, gracias"),
            Some("usuario@ejemplo.com".to_string())
        );
    }

    #[test]
    fn text_without_email_yields_none() {
        assert_eq!(extract_email("no hay nada aquí"), None);
    }
}
