const WORDS_EN: &str = include_str!("../../assets/words-en.json");
const ADJECTIVES_EN: &str = include_str!("../../assets/adjectives-en.json");

pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn load_words() -> Self {
        Self::from_json(WORDS_EN)
    }

    pub fn load_adjectives() -> Self {
        Self::from_json(ADJECTIVES_EN)
    }

    fn from_json(raw: &str) -> Self {
        let words: Vec<String> = serde_json::from_str(raw).unwrap_or_default();

        // Tokens are typed one key at a time, so keep plain lowercase ASCII words only.
        let words = words
            .into_iter()
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
            .collect();

        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_lists_are_non_empty() {
        assert!(Dictionary::load_words().words().len() > 100);
        assert!(Dictionary::load_adjectives().words().len() > 50);
    }

    #[test]
    fn test_from_json_drops_unusable_entries() {
        let dict = Dictionary::from_json(r#"["fine", "", "Caps", "two words", "ok"]"#);
        assert_eq!(dict.words(), &["fine".to_string(), "ok".to_string()]);
    }

    #[test]
    fn test_malformed_json_yields_empty_dictionary() {
        let dict = Dictionary::from_json("not json");
        assert!(dict.words().is_empty());
    }
}
