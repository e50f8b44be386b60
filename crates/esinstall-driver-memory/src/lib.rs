mod exec_log;
pub use exec_log::{ExecLog, Op, OpKind};

use esinstall_core::{
    async_trait, bail,
    driver::{Client, Index, IndexTemplate},
    schema::{IndexSettings, Mappings},
    Error, Result,
};

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// An in-memory search-engine backend.
///
/// Indices and templates live in process memory. Creating a bare index
/// applies the mapping and settings of the highest-order template named
/// like the index prefix (`<template>-*`). Every mutating call is recorded
/// in the [`ExecLog`], including rejected and failed ones.
#[derive(Debug, Default)]
pub struct MemoryClient {
    state: Mutex<State>,
    ops: Arc<Mutex<Vec<Op>>>,
}

#[derive(Debug, Default)]
struct State {
    indices: HashMap<String, Index>,
    templates: HashMap<String, IndexTemplate>,

    /// Calls answered with "not acknowledged"
    rejected: HashSet<OpKind>,

    /// Calls failing at the transport level
    failing: HashSet<OpKind>,

    /// Template existence answers that disagree with the stored templates
    template_exists_override: HashMap<String, bool>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle on the log of mutating calls.
    pub fn exec_log(&self) -> ExecLog {
        ExecLog::new(self.ops.clone())
    }

    /// Seeds an existing index.
    pub fn put_index(&self, name: impl Into<String>, mappings: Mappings) {
        self.state().indices.insert(
            name.into(),
            Index {
                mappings,
                settings: IndexSettings::default(),
            },
        );
    }

    /// Seeds an existing template.
    pub fn put_template(&self, name: impl Into<String>, template: IndexTemplate) {
        self.state().templates.insert(name.into(), template);
    }

    pub fn index(&self, name: &str) -> Option<Index> {
        self.state().indices.get(name).cloned()
    }

    pub fn template(&self, name: &str) -> Option<IndexTemplate> {
        self.state().templates.get(name).cloned()
    }

    pub fn index_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.state().indices.keys().cloned().collect();
        names.sort();
        names
    }

    /// Makes calls of `kind` answer without acknowledging.
    pub fn reject(&self, kind: OpKind) {
        self.state().rejected.insert(kind);
    }

    /// Makes calls of `kind` fail at the transport level.
    pub fn fail(&self, kind: OpKind) {
        self.state().failing.insert(kind);
    }

    /// Makes `template_exists(name)` answer `exists` regardless of the
    /// stored templates.
    pub fn report_template_exists(&self, name: impl Into<String>, exists: bool) {
        self.state()
            .template_exists_override
            .insert(name.into(), exists);
    }

    /// Clears every injected fault.
    pub fn heal(&self) {
        let mut state = self.state();
        state.rejected.clear();
        state.failing.clear();
        state.template_exists_override.clear();
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: Op) {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
    }

    /// Shared prologue of every call: transport failure first, then
    /// rejection.
    fn admit(&self, state: &State, kind: OpKind) -> Result<bool> {
        if state.failing.contains(&kind) {
            return Err(Error::transport_failure(
                kind.call_name(),
                anyhow::anyhow!("connection reset by peer"),
            ));
        }
        Ok(!state.rejected.contains(&kind))
    }
}

#[async_trait]
impl Client for MemoryClient {
    async fn index_exists(&self, name: &str) -> Result<bool> {
        let state = self.state();
        self.admit(&state, OpKind::IndexExists)?;
        Ok(state.indices.contains_key(name))
    }

    async fn get_index(&self, name: &str) -> Result<Option<Index>> {
        let state = self.state();
        self.admit(&state, OpKind::GetIndex)?;
        Ok(state.indices.get(name).cloned())
    }

    async fn template_exists(&self, name: &str) -> Result<bool> {
        let state = self.state();
        self.admit(&state, OpKind::TemplateExists)?;
        Ok(state
            .template_exists_override
            .get(name)
            .copied()
            .unwrap_or_else(|| state.templates.contains_key(name)))
    }

    async fn get_template(&self, name: &str) -> Result<Option<IndexTemplate>> {
        let state = self.state();
        self.admit(&state, OpKind::GetTemplate)?;
        Ok(state.templates.get(name).cloned())
    }

    async fn create_index(
        &self,
        name: &str,
        mappings: &Mappings,
        settings: &IndexSettings,
    ) -> Result<bool> {
        self.record(Op::CreateIndex {
            name: name.to_string(),
            mappings: mappings.clone(),
            settings: settings.clone(),
        });

        let mut state = self.state();
        if !self.admit(&state, OpKind::CreateIndex)? {
            return Ok(false);
        }
        if state.indices.contains_key(name) {
            bail!("index `{name}` already exists");
        }

        state.indices.insert(
            name.to_string(),
            Index {
                mappings: mappings.clone(),
                settings: settings.clone(),
            },
        );
        Ok(true)
    }

    async fn create_bare_index(&self, name: &str) -> Result<bool> {
        self.record(Op::CreateBareIndex {
            name: name.to_string(),
        });

        let mut state = self.state();
        if !self.admit(&state, OpKind::CreateBareIndex)? {
            return Ok(false);
        }
        if state.indices.contains_key(name) {
            bail!("index `{name}` already exists");
        }

        let index = state
            .templates
            .iter()
            .filter(|(template, _)| name.starts_with(&format!("{template}-")))
            .max_by_key(|(_, template)| template.order)
            .map(|(_, template)| Index {
                mappings: template.mappings.clone(),
                settings: template.settings.clone(),
            })
            .unwrap_or_default();

        state.indices.insert(name.to_string(), index);
        Ok(true)
    }

    async fn update_index_mapping(&self, name: &str, append: &Mappings) -> Result<bool> {
        self.record(Op::UpdateIndexMapping {
            name: name.to_string(),
            append: append.clone(),
        });

        let mut state = self.state();
        if !self.admit(&state, OpKind::UpdateIndexMapping)? {
            return Ok(false);
        }
        let Some(index) = state.indices.get_mut(name) else {
            bail!("no such index `{name}`");
        };

        for (field, def) in &append.properties {
            match index.mappings.properties.get(field) {
                Some(existing) if !existing.is_compatible(def) => {
                    bail!(
                        "mapper for [{field}] conflicts with existing mapper: cannot change type from [{}] to [{}]",
                        existing.ty,
                        def.ty
                    );
                }
                Some(_) => {}
                None => {
                    index.mappings.properties.insert(field.clone(), def.clone());
                }
            }
        }
        Ok(true)
    }

    async fn create_or_update_template(
        &self,
        name: &str,
        settings: &IndexSettings,
        mappings: &Mappings,
        order: i32,
    ) -> Result<bool> {
        self.record(Op::CreateOrUpdateTemplate {
            name: name.to_string(),
            settings: settings.clone(),
            mappings: mappings.clone(),
            order,
        });

        let mut state = self.state();
        if !self.admit(&state, OpKind::CreateOrUpdateTemplate)? {
            return Ok(false);
        }

        state.templates.insert(
            name.to_string(),
            IndexTemplate {
                settings: settings.clone(),
                mappings: mappings.clone(),
                order,
            },
        );
        Ok(true)
    }
}
