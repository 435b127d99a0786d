//! Sorted containers matching the node's `flat_set` and `flat_map`.
//!
//! Both sort on construction, so every producer (helpers and JSON coercion
//! alike) yields the canonical wire order. Decoding keeps entries as found.

use std::fmt;

use peerplays_primitives::util::{WireReader, WireWriter};
use serde_json::Value;

use crate::codec::{Decode, Encode};
use crate::json::JsonField;
use crate::TypesError;

/// An ascending set without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlatSet<T>(Vec<T>);

impl<T: Ord> FlatSet<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort();
        items.dedup();
        FlatSet(items)
    }

    /// Insert `item` at its sorted position; returns false when already held.
    pub fn insert(&mut self, item: T) -> bool {
        match self.0.binary_search(&item) {
            Ok(_) => false,
            Err(at) => {
                self.0.insert(at, item);
                true
            }
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.0.binary_search(item).is_ok()
    }
}

impl<T> FlatSet<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for FlatSet<T> {
    fn default() -> Self {
        FlatSet(Vec::new())
    }
}

impl<T: Ord> FromIterator<T> for FlatSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        FlatSet::new(iter)
    }
}

impl<'a, T> IntoIterator for &'a FlatSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Encode> Encode for FlatSet<T> {
    fn encode(&self, writer: &mut WireWriter) {
        self.0.encode(writer);
    }
}

impl<T: Decode> Decode for FlatSet<T> {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(FlatSet(Vec::decode(reader)?))
    }
}

impl<T: JsonField + Ord> JsonField for FlatSet<T> {
    fn to_json(&self) -> Value {
        self.0.to_json()
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        Ok(FlatSet::new(Vec::<T>::from_json(value)?))
    }
}

/// Key/value entries in ascending key order; keys are unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlatMap<K, V>(Vec<(K, V)>);

impl<K: Ord + fmt::Display, V> FlatMap<K, V> {
    /// Sort `entries` by key; a key listed twice is rejected.
    pub fn new(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self, TypesError> {
        let mut entries: Vec<(K, V)> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(TypesError::InvalidField(format!("key {} listed twice", pair[0].0)));
        }
        Ok(FlatMap(entries))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.0
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|at| &self.0[at].1)
    }
}

impl<K, V> FlatMap<K, V> {
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> Default for FlatMap<K, V> {
    fn default() -> Self {
        FlatMap(Vec::new())
    }
}

impl<'a, K, V> IntoIterator for &'a FlatMap<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Encode, V: Encode> Encode for FlatMap<K, V> {
    fn encode(&self, writer: &mut WireWriter) {
        self.0.encode(writer);
    }
}

impl<K: Decode, V: Decode> Decode for FlatMap<K, V> {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(FlatMap(Vec::decode(reader)?))
    }
}

/// Entries render as `[key, value]` pairs.
impl<K, V> JsonField for FlatMap<K, V>
where
    K: JsonField + Ord + fmt::Display,
    V: JsonField,
{
    fn to_json(&self) -> Value {
        self.0.to_json()
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        FlatMap::new(Vec::<(K, V)>::from_json(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_id::{tag, Id};
    use crate::BettingMarketResolution;
    use serde_json::json;

    #[test]
    fn test_flat_set_sorts_and_dedups() {
        let set: FlatSet<Id<tag::Account>> =
            FlatSet::from_json(&json!(["1.2.9", "1.2.4", "1.2.9"])).unwrap();
        assert_eq!(set.as_slice(), &[Id::new(4), Id::new(9)]);
        assert_eq!(set.to_json(), json!(["1.2.4", "1.2.9"]));
    }

    #[test]
    fn test_flat_set_insert_keeps_order() {
        let mut set = FlatSet::new([Id::<tag::Account>::new(9)]);
        assert!(set.insert(Id::new(3)));
        assert!(!set.insert(Id::new(9)));
        assert_eq!(set.as_slice(), &[Id::new(3), Id::new(9)]);
        assert!(set.contains(&Id::new(3)));
    }

    #[test]
    fn test_flat_map_sorts_by_key() {
        let map: FlatMap<Id<tag::BettingMarket>, BettingMarketResolution> =
            FlatMap::from_json(&json!([["1.25.3", "win"], ["1.25.2", "not_win"]])).unwrap();
        assert_eq!(
            map.as_slice(),
            &[
                (Id::new(2), BettingMarketResolution::NotWin),
                (Id::new(3), BettingMarketResolution::Win),
            ]
        );
        assert_eq!(map.get(&Id::new(3)), Some(&BettingMarketResolution::Win));
        assert_eq!(map.get(&Id::new(4)), None);
    }

    #[test]
    fn test_flat_map_rejects_duplicate_keys() {
        let err = FlatMap::<Id<tag::BettingMarket>, BettingMarketResolution>::from_json(&json!([
            ["1.25.1", "win"],
            ["1.25.1", "cancel"]
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("1.25.1"));
    }
}
