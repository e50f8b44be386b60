use super::Mappings;

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Last known field layout per physical table.
///
/// Each entry accumulates every mapping put for its table: live mappings
/// fetched from the backend and mappings computed from models. Each call
/// holds the lock for its whole read-modify-write, so an entry is never
/// observed half merged.
#[derive(Debug, Default)]
pub struct Structures {
    tables: Mutex<HashMap<String, Mappings>>,
}

impl Structures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `mapping` into the known structure of `table`.
    ///
    /// Fields not yet known are added. Known fields keep their current
    /// definition, so a field's type never changes once seen. Source
    /// excludes are unioned. A mapping without fields is ignored.
    pub fn put(&self, table: &str, mapping: &Mappings) {
        if mapping.is_empty() {
            return;
        }

        let mut tables = self.lock();
        match tables.get_mut(table) {
            Some(known) => merge(table, known, mapping),
            None => {
                tables.insert(table.to_string(), mapping.clone());
            }
        }
    }

    /// The known structure of `table` as [`put`](Self::put) would leave it
    /// after merging `mapping`, without storing anything.
    pub fn merged(&self, table: &str, mapping: &Mappings) -> Mappings {
        let mut known = self.mapping(table).unwrap_or_default();
        merge(table, &mut known, mapping);
        known
    }

    /// Returns `true` if every field of `candidate` is part of the known
    /// structure of `table` with the same type. The known structure may have
    /// more fields. Unknown tables contain nothing.
    pub fn contains(&self, table: &str, candidate: &Mappings) -> bool {
        self.lock()
            .get(table)
            .is_some_and(|known| known.contains_all(candidate))
    }

    /// Fields of the known structure of `table` that `live` lacks.
    ///
    /// The result only ever adds fields and never carries source filtering,
    /// which cannot be changed on an existing index.
    pub fn diff(&self, table: &str, live: &Mappings) -> Mappings {
        self.lock()
            .get(table)
            .map(|known| known.missing_from(live))
            .unwrap_or_default()
    }

    /// The known structure of `table`.
    pub fn mapping(&self, table: &str) -> Option<Mappings> {
        self.lock().get(table).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Mappings>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn merge(table: &str, known: &mut Mappings, mapping: &Mappings) {
    for (name, field) in &mapping.properties {
        match known.properties.get(name) {
            Some(existing) if !existing.is_compatible(field) => {
                tracing::warn!(
                    table,
                    field = %name,
                    existing = %existing.ty,
                    requested = %field.ty,
                    "field type conflict; keeping existing type"
                );
            }
            Some(_) => {}
            None => {
                known.properties.insert(name.clone(), field.clone());
            }
        }
    }

    known
        .source
        .excludes
        .extend(mapping.source.excludes.iter().cloned());
}
