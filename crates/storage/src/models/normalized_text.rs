/// Text folded for Turkish-insensitive search.
///
/// Lowercases with Turkish casing rules and folds the letters that carry
/// diacritics in Turkish orthography to their base Latin letter, so that
/// "İstanbul", "ISTANBUL" and "istanbul" compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Folds `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront_storage::models::NormalizedText;
    ///
    /// let folded = NormalizedText::new("İstanbul Şişli Çorum");
    /// assert_eq!(folded.as_str(), "istanbul sisli corum");
    /// ```
    pub fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        for c in text.chars() {
            match fold_char(c) {
                Some(base) => folded.push(base),
                // Dotted capital I lowercases to `i` + U+0307 outside a Turkish locale.
                None if c == '\u{0307}' => {}
                None => folded.extend(c.to_lowercase().filter(|&l| l != '\u{0307}')),
            }
        }
        Self(folded)
    }

    /// Folds optional text, treating a missing value as empty.
    pub fn from_optional(text: Option<&str>) -> Self {
        text.map(Self::new).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, needle: &NormalizedText) -> bool {
        self.0.contains(needle.as_str())
    }
}

/// Letters that Turkish casing or orthography maps onto a base Latin letter.
pub const TURKISH_SPECIAL_LETTERS: &[char] = &[
    'İ', 'I', 'ı', 'Ş', 'ş', 'Ğ', 'ğ', 'Ü', 'ü', 'Ö', 'ö', 'Ç', 'ç', 'Â', 'â', 'Î', 'î', 'Û', 'û',
];

fn fold_char(c: char) -> Option<char> {
    let base = match c {
        // Turkish casing: I lowercases to dotless ı, which then folds to i.
        'İ' | 'I' | 'ı' | 'Î' | 'î' => 'i',
        'Ş' | 'ş' => 's',
        'Ğ' | 'ğ' => 'g',
        'Ü' | 'ü' | 'Û' | 'û' => 'u',
        'Ö' | 'ö' => 'o',
        'Ç' | 'ç' => 'c',
        'Â' | 'â' => 'a',
        _ => return None,
    };
    Some(base)
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_folds_turkish_letters() {
        assert_eq!(
            NormalizedText::new("İstanbul Şişli Çorum").as_str(),
            "istanbul sisli corum"
        );
        assert_eq!(NormalizedText::new("ĞÜÖ ğüö").as_str(), "guo guo");
        assert_eq!(NormalizedText::new("Kâğıt").as_str(), "kagit");
    }

    #[test]
    fn test_dotless_and_dotted_i_are_equal() {
        assert_eq!(NormalizedText::new("ISPARTA"), NormalizedText::new("ısparta"));
        assert_eq!(NormalizedText::new("IĞDIR"), NormalizedText::new("iğdir"));
    }

    #[test]
    fn test_strips_combining_dot() {
        assert_eq!(NormalizedText::new("i\u{0307}stanbul").as_str(), "istanbul");
    }

    #[test]
    fn test_missing_text_is_empty() {
        assert!(NormalizedText::from_optional(None).is_empty());
        assert_eq!(NormalizedText::from_optional(Some("Çiğ")).as_str(), "cig");
    }

    #[test]
    fn test_other_characters_are_lowercased_only() {
        assert_eq!(NormalizedText::new("Crème BRÛLÉE 42").as_str(), "crème brulée 42");
    }

    proptest! {
        #[test]
        fn prop_output_has_no_turkish_special_letters(input in "\\PC*") {
            let folded = NormalizedText::new(&input);
            prop_assert!(!folded.as_str().chars().any(|c| TURKISH_SPECIAL_LETTERS.contains(&c)));
        }

        #[test]
        fn prop_folding_is_idempotent(input in "[a-zA-ZçÇğĞıİöÖşŞüÜ ]{0,32}") {
            let once = NormalizedText::new(&input);
            let twice = NormalizedText::new(once.as_str());
            prop_assert_eq!(once, twice);
        }
    }
}
