//! Formation: how many instances of each process type to run.
//!
//! A per-type entry overrides the reserved `all` entry; it never adds to it.
//! Anything unmatched runs zero instances.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::types::ProcessTypeEntry;

/// Key that applies to every process type without its own entry.
pub const ALL: &str = "all";

/// Desired instance count per process type.
///
/// Counts are signed because they come from user input unchecked; a negative
/// count resolves to zero instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formation(BTreeMap<String, i64>);

impl Formation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a formation with only an `all` entry.
    pub fn all(count: i64) -> Self {
        Self::new().with(ALL, count)
    }

    pub fn set(&mut self, name: impl Into<String>, count: i64) {
        self.0.insert(name.into(), count);
    }

    pub fn with(mut self, name: impl Into<String>, count: i64) -> Self {
        self.set(name, count);
        self
    }

    /// Raw configured value for `name`, without the `all` fallback.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    /// Number of instances to materialize for `entry`.
    pub fn resolve(&self, entry: &ProcessTypeEntry) -> u32 {
        self.resolve_name(&entry.name)
    }

    pub fn resolve_name(&self, name: &str) -> u32 {
        let count = self
            .0
            .get(name)
            .or_else(|| self.0.get(ALL))
            .copied()
            .unwrap_or(0);
        u32::try_from(count.max(0)).unwrap_or(u32::MAX)
    }

    /// Parse the CLI form: `all=1,web=2,worker=0`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let mut formation = Formation::new();
        for item in s.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            let (name, count) = item
                .split_once('=')
                .ok_or_else(|| CoreError::InvalidFormation(item.to_string()))?;
            let name = name.trim();
            let count: i64 = count
                .trim()
                .parse()
                .map_err(|_| CoreError::InvalidFormation(item.to_string()))?;
            if name.is_empty() {
                return Err(CoreError::InvalidFormation(item.to_string()));
            }
            formation.set(name, count);
        }
        Ok(formation)
    }
}
