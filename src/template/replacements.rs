//! Placeholder tokens and per-record replacement maps

use crate::models::Record;
use serde::{Deserialize, Serialize};

/// Literal placeholder texts expected in the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateTokens {
    pub customer: String,
    pub code: String,
    pub street: String,
    pub city: String,
    /// Date label to replace
    pub date: String,
    /// What the date label becomes; `{date}` is replaced with the formatted date
    pub date_replacement: String,
}

impl Default for TemplateTokens {
    fn default() -> Self {
        Self {
            customer: "KOLOM A".to_string(),
            code: "KOLOM B".to_string(),
            street: "KOLOM C".to_string(),
            city: "KOLOM D".to_string(),
            date: "Datum: van vandaag".to_string(),
            date_replacement: "Datum: {date}".to_string(),
        }
    }
}

impl TemplateTokens {
    /// Token keys in substitution order
    pub fn keys(&self) -> [&str; 5] {
        [&self.customer, &self.code, &self.street, &self.city, &self.date]
    }
}

/// Ordered token → value pairs.
///
/// Keys are applied one after another, each as a single literal
/// replace-all pass over the text produced by the previous keys. A value
/// that contains a later key is therefore rewritten by that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap {
    entries: Vec<(String, String)>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. Empty keys are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.entries.push((key, value.into()));
    }

    pub fn for_record(record: &Record, tokens: &TemplateTokens, date: &str) -> Self {
        let mut map = Self::new();
        map.insert(&tokens.customer, &record.customer);
        map.insert(&tokens.code, &record.code);
        map.insert(&tokens.street, &record.street);
        map.insert(&tokens.city, &record.city);
        map.insert(&tokens.date, tokens.date_replacement.replace("{date}", date));
        map
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (key, value) in &self.entries {
            if result.contains(key.as_str()) {
                result = result.replace(key.as_str(), value);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn acme() -> Record {
        Record::new("Acme B.V.", "871234", "Main St 1", "Town")
    }

    #[test]
    fn test_map_order_and_date() {
        let map = ReplacementMap::for_record(&acme(), &TemplateTokens::default(), "19-10-2026");
        let pairs: Vec<(&str, &str)> = map.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("KOLOM A", "Acme B.V."),
                ("KOLOM B", "871234"),
                ("KOLOM C", "Main St 1"),
                ("KOLOM D", "Town"),
                ("Datum: van vandaag", "Datum: 19-10-2026"),
            ]
        );
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let map = ReplacementMap::for_record(&acme(), &TemplateTokens::default(), "01-01-2026");
        assert_eq!(
            map.apply("KOLOM A / KOLOM A (KOLOM B)"),
            "Acme B.V. / Acme B.V. (871234)"
        );
    }

    #[test]
    fn test_substring_match_inside_words() {
        let map = ReplacementMap::for_record(&acme(), &TemplateTokens::default(), "01-01-2026");
        assert_eq!(map.apply("xxKOLOM Dyy"), "xxTownyy");
    }

    #[test]
    fn test_unmapped_text_is_untouched() {
        let map = ReplacementMap::for_record(&acme(), &TemplateTokens::default(), "01-01-2026");
        assert_eq!(map.apply("KOLOM E stays"), "KOLOM E stays");
    }

    #[test]
    fn test_value_containing_later_key_is_rewritten() {
        let record = Record::new("KOLOM B Holding", "871234", "Main St", "Town");
        let map = ReplacementMap::for_record(&record, &TemplateTokens::default(), "01-01-2026");
        assert_eq!(map.apply("KOLOM A"), "871234 Holding");
    }

    #[test]
    fn test_value_containing_earlier_key_is_kept() {
        let record = Record::new("Acme", "KOLOM A", "Main St", "Town");
        let map = ReplacementMap::for_record(&record, &TemplateTokens::default(), "01-01-2026");
        // KOLOM A was already applied when KOLOM B introduces it
        assert_eq!(map.apply("KOLOM B"), "KOLOM A");
    }

    #[test]
    fn test_empty_keys_ignored() {
        let mut map = ReplacementMap::new();
        map.insert("", "x");
        assert!(map.is_empty());
        assert_eq!(map.apply("abc"), "abc");
    }
}
