use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Keyword field recording which logical table a row of a shared physical
/// metrics table belongs to.
pub const METRIC_TABLE_NAME: &str = "metric_table";

/// Records which physical table each logical model is stored in.
///
/// Several logical models share one physical table when logic sharding is
/// off; the write and query paths use this register to tell them apart.
#[derive(Debug, Default)]
pub struct LogicIndicesRegister {
    relations: Mutex<HashMap<String, String>>,
}

impl LogicIndicesRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_relation(&self, logical: &str, physical: &str) {
        self.lock()
            .insert(logical.to_string(), physical.to_string());
    }

    pub fn physical_table(&self, logical: &str) -> Option<String> {
        self.lock().get(logical).cloned()
    }

    /// Logical models stored in `physical`, sorted by name.
    pub fn logical_tables(&self, physical: &str) -> Vec<String> {
        let mut tables: Vec<_> = self
            .lock()
            .iter()
            .filter(|(_, table)| table.as_str() == physical)
            .map(|(logical, _)| logical.clone())
            .collect();
        tables.sort();
        tables
    }

    /// Returns `true` when more than one logical model lives in `physical`.
    pub fn is_shared(&self, physical: &str) -> bool {
        self.lock()
            .values()
            .filter(|table| table.as_str() == physical)
            .nth(1)
            .is_some()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.relations.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
