//! Name-to-value mappings that expressions are evaluated against.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::Error;
use crate::values::Value;

/// A read-only name lookup supplied by the caller for one evaluation.
///
/// The engine never mutates an environment and does not keep it past the
/// evaluation call.
pub trait Environment {
    fn get(&self, name: &str) -> Option<Value>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn get(&self, name: &str) -> Option<Value> {
        (**self).get(name)
    }
}

/// The empty environment.
impl Environment for () {
    fn get(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl<S: BuildHasher> Environment for HashMap<String, Value, S> {
    fn get(&self, name: &str) -> Option<Value> {
        HashMap::get(self, name).cloned()
    }
}

impl<S: BuildHasher> Environment for hashbrown::HashMap<String, Value, S> {
    fn get(&self, name: &str) -> Option<Value> {
        hashbrown::HashMap::get(self, name).cloned()
    }
}

impl Environment for BTreeMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        BTreeMap::get(self, name).cloned()
    }
}

/// An immutable set of bindings sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<(String, Value)>,
}

impl Bindings {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_ok()
    }

    fn position(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(entry, _)| entry.as_str().cmp(name))
    }
}

impl Environment for Bindings {
    fn get(&self, name: &str) -> Option<Value> {
        self.position(name)
            .ok()
            .map(|index| self.entries[index].1.clone())
    }
}

/// Collects bindings; a later binding of the same name replaces the earlier one.
impl<N: Into<String>> FromIterator<(N, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        let entries: BTreeMap<String, Value> = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

/// Builder for a [`Bindings`] set that rejects duplicate names.
///
/// # Example
///
/// ```
/// use sel_core::{EnvironmentBuilder, Environment, Value};
///
/// let env = EnvironmentBuilder::new()
///     .bind("answer", Value::Int(42))
///     .bind("name", Value::from("sel"))
///     .build()
///     .unwrap();
/// assert_eq!(env.get("answer"), Some(Value::Int(42)));
///
/// let err = EnvironmentBuilder::new()
///     .bind("x", Value::Int(1))
///     .bind("x", Value::Int(2))
///     .build()
///     .unwrap_err();
/// assert_eq!(err.to_string(), "duplicate binding(s): x");
/// ```
#[derive(Debug, Default)]
pub struct EnvironmentBuilder {
    entries: BTreeMap<String, Value>,
    duplicates: Vec<String>,
}

impl EnvironmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a value under `name`.
    ///
    /// A duplicate name is recorded and reported by [`build`](Self::build).
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if self.entries.contains_key(&name) {
            self.duplicates.push(name);
            return self;
        }
        self.entries.insert(name, value.into());
        self
    }

    pub fn build(mut self) -> Result<Bindings, Error> {
        if !self.duplicates.is_empty() {
            return Err(Error::DuplicateBinding(core::mem::take(&mut self.duplicates)));
        }
        Ok(Bindings {
            entries: self.entries.into_iter().collect(),
        })
    }
}

/// Caller bindings layered over a fallback set; the caller always wins.
pub(crate) struct Layered<'a> {
    env: &'a dyn Environment,
    fallback: &'a Bindings,
}

impl<'a> Layered<'a> {
    pub(crate) fn new(env: &'a dyn Environment, fallback: &'a Bindings) -> Self {
        Self { env, fallback }
    }
}

impl Environment for Layered<'_> {
    fn get(&self, name: &str) -> Option<Value> {
        self.env.get(name).or_else(|| self.fallback.get(name))
    }
}
