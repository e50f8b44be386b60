use esinstall_core::schema::{IndexSettings, Mappings};

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// A mutating call received by the [`MemoryClient`](crate::MemoryClient).
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    CreateIndex {
        name: String,
        mappings: Mappings,
        settings: IndexSettings,
    },
    CreateBareIndex {
        name: String,
    },
    UpdateIndexMapping {
        name: String,
        append: Mappings,
    },
    CreateOrUpdateTemplate {
        name: String,
        settings: IndexSettings,
        mappings: Mappings,
        order: i32,
    },
}

/// Client calls faults can be injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    IndexExists,
    GetIndex,
    TemplateExists,
    GetTemplate,
    CreateIndex,
    CreateBareIndex,
    UpdateIndexMapping,
    CreateOrUpdateTemplate,
}

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<Op>>>,
}

impl Op {
    pub fn kind(&self) -> OpKind {
        match self {
            Op::CreateIndex { .. } => OpKind::CreateIndex,
            Op::CreateBareIndex { .. } => OpKind::CreateBareIndex,
            Op::UpdateIndexMapping { .. } => OpKind::UpdateIndexMapping,
            Op::CreateOrUpdateTemplate { .. } => OpKind::CreateOrUpdateTemplate,
        }
    }

    /// Name of the index or template the call is about.
    pub fn name(&self) -> &str {
        match self {
            Op::CreateIndex { name, .. }
            | Op::CreateBareIndex { name }
            | Op::UpdateIndexMapping { name, .. }
            | Op::CreateOrUpdateTemplate { name, .. } => name,
        }
    }
}

impl OpKind {
    /// Name of the [`Client`](esinstall_core::Client) method.
    pub fn call_name(self) -> &'static str {
        match self {
            OpKind::IndexExists => "index_exists",
            OpKind::GetIndex => "get_index",
            OpKind::TemplateExists => "template_exists",
            OpKind::GetTemplate => "get_template",
            OpKind::CreateIndex => "create_index",
            OpKind::CreateBareIndex => "create_bare_index",
            OpKind::UpdateIndexMapping => "update_index_mapping",
            OpKind::CreateOrUpdateTemplate => "create_or_update_template",
        }
    }
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<Op>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.lock().clear();
    }

    /// Kinds of the logged operations, oldest first
    pub fn kinds(&self) -> Vec<OpKind> {
        self.lock().iter().map(Op::kind).collect()
    }

    /// Remove and return the first operation from the log
    #[track_caller]
    pub fn pop(&mut self) -> Op {
        let mut ops = self.lock();
        if ops.is_empty() {
            panic!("no operations in log");
        }
        ops.remove(0)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Op>> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ExecLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ops = self.lock();
        f.debug_struct("ExecLog").field("ops", &*ops).finish()
    }
}
