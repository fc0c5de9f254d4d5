use std::{
    hash::{Hash, Hasher},
    ops::Deref,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::EmptyCollection;

/// Multi-valued field with set semantics: duplicates are dropped (first one
/// kept) and two sets are equal regardless of element order.
#[derive(Clone, Debug)]
pub struct SetOf<T>(Vec<T>);

impl<T: PartialEq> SetOf<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut out: Vec<T> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Self(out)
    }

    pub fn non_empty(items: impl IntoIterator<Item = T>) -> Result<Self, EmptyCollection> {
        let set = Self::new(items);
        if set.0.is_empty() {
            return Err(EmptyCollection);
        }
        Ok(set)
    }
}

impl<T> Default for SetOf<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for SetOf<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for SetOf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|item| other.0.contains(item))
    }
}

impl<T: Eq> Eq for SetOf<T> {}

// Element order must not change the hash, so only the size is fed in.
impl<T> Hash for SetOf<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
    }
}

impl<T: PartialEq> FromIterator<T> for SetOf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: Serialize> Serialize for SetOf<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + PartialEq> Deserialize<'de> for SetOf<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::new)
    }
}

/// `deserialize_with` helper for mandatory lists that must not be empty.
pub fn non_empty<'de, D, T>(deserializer: D) -> Result<SetOf<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + PartialEq,
{
    let set = SetOf::<T>::deserialize(deserializer)?;
    if set.is_empty() {
        return Err(serde::de::Error::custom(EmptyCollection));
    }
    Ok(set)
}
