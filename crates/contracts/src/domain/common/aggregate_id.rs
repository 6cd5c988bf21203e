use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Identifier of an aggregate, convertible to and from its wire/storage text form
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    fn as_string(&self) -> String;

    /// Parse an identifier received from a path segment or a storage column
    fn from_string(s: &str) -> Result<Self, String>;
}
