use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One logical text field published in several languages, keyed by locale code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized(pub BTreeMap<String, String>);

impl Localized {
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Localized {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_locale_map() {
        let title: Localized = [("en", "Hello"), ("fr", "Bonjour")].into_iter().collect();
        let json = serde_json::to_value(&title).unwrap();
        assert_eq!(json, serde_json::json!({ "en": "Hello", "fr": "Bonjour" }));
        assert_eq!(title.get("fr"), Some("Bonjour"));
        assert_eq!(title.get("ar"), None);
    }
}
