//! Display label helpers

/// Heading for a user's album list, possessive-formed from their first name.
///
/// Names ending in "s" take a bare apostrophe ("James' albums:"); a missing
/// name falls back to the generic heading.
pub fn possessive_albums_label(first_name: &str) -> String {
    if first_name.is_empty() {
        return "Your albums:".to_string();
    }
    if first_name.ends_with('s') {
        format!("{}' albums:", first_name)
    } else {
        format!("{}'s albums:", first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_name_gets_apostrophe_s() {
        assert_eq!(possessive_albums_label("Test"), "Test's albums:");
    }

    #[test]
    fn name_ending_in_s_gets_bare_apostrophe() {
        assert_eq!(possessive_albums_label("James"), "James' albums:");
    }

    #[test]
    fn empty_name_falls_back_to_generic() {
        assert_eq!(possessive_albums_label(""), "Your albums:");
    }

    #[test]
    fn only_the_last_character_matters() {
        assert_eq!(possessive_albums_label("Sam"), "Sam's albums:");
        assert_eq!(possessive_albums_label("s"), "s' albums:");
    }
}
