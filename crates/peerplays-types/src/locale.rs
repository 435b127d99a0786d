//! Multi-locale text maps used for sport, event and market names.

use peerplays_primitives::util::{WireReader, WireWriter};
use serde_json::Value;

use crate::codec::{Decode, Encode};
use crate::json::JsonField;
use crate::TypesError;

/// A `locale -> text` map, kept sorted by locale code.
///
/// The wire form is a varint count followed by `(locale, text)` string pairs
/// in ascending locale order; the node rejects any other order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocalizedString {
    entries: Vec<(String, String)>,
}

impl LocalizedString {
    /// Build a map from `(locale, text)` pairs in any order.
    ///
    /// # Returns
    /// The sorted map, or `InvalidField` if a locale appears twice.
    pub fn new<L, T, I>(entries: I) -> Result<Self, TypesError>
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        let mut entries: Vec<(String, String)> = entries
            .into_iter()
            .map(|(l, t)| (l.into(), t.into()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(dup) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(TypesError::InvalidField(format!(
                "locale {} appears more than once",
                dup[0].0
            )));
        }
        Ok(LocalizedString { entries })
    }

    /// A single-locale map.
    pub fn single(locale: &str, text: &str) -> Self {
        LocalizedString {
            entries: vec![(locale.to_string(), text.to_string())],
        }
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, t)| t.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Encode for LocalizedString {
    fn encode(&self, writer: &mut WireWriter) {
        self.entries.encode(writer);
    }
}

impl Decode for LocalizedString {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(LocalizedString {
            entries: Vec::decode(reader)?,
        })
    }
}

/// Accepts `[[locale, text], ...]` or `{locale: text, ...}`; emits the array form.
impl JsonField for LocalizedString {
    fn to_json(&self) -> Value {
        self.entries.to_json()
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        match value {
            Value::Object(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (locale, text) in map {
                    pairs.push((locale.clone(), String::from_json(text)?));
                }
                LocalizedString::new(pairs)
            }
            other => LocalizedString::new(<Vec<(String, String)>>::from_json(other)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sorted_by_locale() {
        let a = LocalizedString::new([("en", "Football"), ("de", "Fussball")]).unwrap();
        let b = LocalizedString::new([("de", "Fussball"), ("en", "Football")]).unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
        assert_eq!(a.entries()[0].0, "de");
        assert_eq!(a.get("en"), Some("Football"));
    }

    #[test]
    fn test_wire_form() {
        let m = LocalizedString::single("en", "Hi");
        assert_eq!(m.to_hex(), "0102656e024869");
    }

    #[test]
    fn test_json_forms() {
        let from_pairs = LocalizedString::from_json(&json!([["en", "A"], ["de", "B"]])).unwrap();
        let from_map = LocalizedString::from_json(&json!({"en": "A", "de": "B"})).unwrap();
        assert_eq!(from_pairs, from_map);
        assert_eq!(from_pairs.to_json(), json!([["de", "B"], ["en", "A"]]));
    }

    #[test]
    fn test_duplicate_locale_rejected() {
        assert!(LocalizedString::new([("en", "A"), ("en", "B")]).is_err());
    }
}
