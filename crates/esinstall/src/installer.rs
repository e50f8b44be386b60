use crate::{
    create_mapping, create_settings, IndexController, LogicIndicesRegister, StorageConfig,
    TableNaming,
};

use esinstall_core::{
    driver::{Client, IndexTemplate},
    schema::{AnalyzerRegistry, IndexSettings, Mappings, Model, Structures},
    Error, Result,
};

use std::sync::Arc;

/// Brings the backend schema of models in line with their definitions.
///
/// Static models get a single index, created with the model's mapping and
/// settings or extended with the fields it lacks. Time-series models get
/// an index template plus the current write index; the template is
/// rewritten whenever it lacks a field, and on every pass the write index
/// is created from it or extended like a static index.
///
/// The structure cache only learns a model's fields once the backend has
/// acknowledged them, so a failed pass is retried in full by the next one.
///
/// Changes are additive only. Fields are never removed and a field keeps
/// its type once the backend has it.
pub struct Installer {
    client: Arc<dyn Client>,
    config: StorageConfig,
    naming: Box<dyn TableNaming>,
    analyzers: AnalyzerRegistry,
    structures: Arc<Structures>,
    register: Arc<LogicIndicesRegister>,
}

/// What a model needs in the backend, computed once per pass.
struct Target<'a> {
    model: &'a Model,
    table: String,
    mappings: Mappings,
    settings: IndexSettings,
}

impl Installer {
    pub fn new(client: Arc<dyn Client>, config: StorageConfig) -> Self {
        Self {
            client,
            naming: Box::new(IndexController::new(&config)),
            config,
            analyzers: AnalyzerRegistry::default(),
            structures: Arc::new(Structures::new()),
            register: Arc::new(LogicIndicesRegister::new()),
        }
    }

    /// Replace the table naming policy.
    pub fn naming(mut self, naming: impl TableNaming + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }

    /// Replace the analyzer generators.
    pub fn analyzers(mut self, analyzers: AnalyzerRegistry) -> Self {
        self.analyzers = analyzers;
        self
    }

    /// Share a structure cache with other installers.
    pub fn structures(mut self, structures: Arc<Structures>) -> Self {
        self.structures = structures;
        self
    }

    /// Share the logical to physical table register.
    pub fn register(mut self, register: Arc<LogicIndicesRegister>) -> Self {
        self.register = register;
        self
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn known_structures(&self) -> &Arc<Structures> {
        &self.structures
    }

    pub fn logic_indices(&self) -> &Arc<LogicIndicesRegister> {
        &self.register
    }

    /// Reconciles every model, independently of each other. One result per
    /// model, in order.
    pub async fn install_all(&self, models: &[Model]) -> Vec<Result<()>> {
        let mut results = Vec::with_capacity(models.len());

        for model in models {
            let result = self.install(model).await;
            if let Err(err) = &result {
                tracing::error!(model = %model.name, %err, "cannot install model");
            }
            results.push(result);
        }

        results
    }

    /// Reconciles one model with the backend.
    pub async fn install(&self, model: &Model) -> Result<()> {
        let table = self.naming.table_name(model);
        self.register.register_relation(&model.name, &table);

        let target = Target {
            model,
            mappings: create_mapping(model, self.naming.is_metric_model(model))?,
            settings: create_settings(model, &self.config, &self.analyzers)?,
            table,
        };

        if model.time_series {
            self.install_template(&target).await
        } else {
            self.install_index(&target).await
        }
    }

    async fn install_index(&self, target: &Target<'_>) -> Result<()> {
        let table = target.table.as_str();

        if !self.client.index_exists(table).await? {
            tracing::info!(table, "index does not exist");

            let acknowledged = self
                .client
                .create_index(table, &target.mappings, &target.settings)
                .await?;
            tracing::info!(table, acknowledged, "create index finished");
            if !acknowledged {
                return Err(Error::storage_failure(table, "create index"));
            }

            self.structures.put(table, &target.mappings);
            return Ok(());
        }

        let live = self.live_mappings(table).await?;
        self.structures.put(table, &live);
        if self.structures.contains(table, &target.mappings) {
            tracing::debug!(table, "index is up to date");
            return Ok(());
        }

        let candidate = self.structures.merged(table, &target.mappings);
        self.append_fields(table, &candidate.missing_from(&live)).await?;
        self.structures.put(table, &target.mappings);
        Ok(())
    }

    async fn install_template(&self, target: &Target<'_>) -> Result<()> {
        let table = target.table.as_str();

        let up_to_date = match self.fetch_template(table).await? {
            Some(template) => {
                self.structures.put(table, &template.mappings);
                self.structures.contains(table, &target.mappings)
            }
            None => {
                tracing::info!(table, "index template does not exist");
                false
            }
        };

        if up_to_date {
            tracing::debug!(table, "index template is up to date");
        } else {
            self.write_template(target)
                .await
                .map_err(|err| into_storage_failure(err, table, "create index template"))?;
        }

        let index = self.naming.latest_write_index_name(target.model);
        self.prepare_write_index(table, &index)
            .await
            .map_err(|err| into_storage_failure(err, &index, "prepare write index"))
    }

    async fn write_template(&self, target: &Target<'_>) -> Result<()> {
        let table = target.table.as_str();
        let mappings = self.structures.merged(table, &target.mappings);

        let acknowledged = self
            .client
            .create_or_update_template(
                table,
                &target.settings,
                &mappings,
                self.config.index_template_order,
            )
            .await?;
        tracing::info!(table, acknowledged, "create index template finished");
        if !acknowledged {
            return Err(Error::storage_failure(table, "create index template"));
        }

        self.structures.put(table, &target.mappings);
        Ok(())
    }

    /// Brings the current write index of `table` in line with the known
    /// structure, creating it from the template when it does not exist.
    async fn prepare_write_index(&self, table: &str, index: &str) -> Result<()> {
        if self.client.index_exists(index).await? {
            let live = self.live_mappings(index).await?;
            return self
                .append_fields(index, &self.structures.diff(table, &live))
                .await;
        }

        let acknowledged = self.client.create_bare_index(index).await?;
        tracing::info!(index, acknowledged, "create index finished");
        if !acknowledged {
            return Err(Error::storage_failure(index, "create index"));
        }
        Ok(())
    }

    async fn append_fields(&self, index: &str, append: &Mappings) -> Result<()> {
        if append.is_empty() {
            return Ok(());
        }

        let acknowledged = self.client.update_index_mapping(index, append).await?;
        tracing::info!(
            index,
            acknowledged,
            fields = ?append.properties.keys().collect::<Vec<_>>(),
            "update index mapping finished"
        );
        if !acknowledged {
            return Err(Error::storage_failure(index, "update index mapping"));
        }
        Ok(())
    }

    async fn live_mappings(&self, index: &str) -> Result<Mappings> {
        Ok(self
            .client
            .get_index(index)
            .await?
            .map(|index| index.mappings)
            .unwrap_or_default())
    }

    /// Fetches the template of `table`, checking that the backend agrees
    /// with itself about its existence.
    async fn fetch_template(&self, table: &str) -> Result<Option<IndexTemplate>> {
        let exists = self.client.template_exists(table).await?;
        let template = self.client.get_template(table).await?;

        match (exists, template) {
            (true, Some(template)) => Ok(Some(template)),
            (false, None) => Ok(None),
            (true, None) => Err(Error::backend_inconsistency(format!(
                "template `{table}` is reported to exist but cannot be fetched"
            ))),
            (false, Some(_)) => Err(Error::backend_inconsistency(format!(
                "template `{table}` is reported missing but can be fetched"
            ))),
        }
    }
}

/// Failures on the time-series path all surface as storage failures; any
/// other error becomes the cause of one.
fn into_storage_failure(err: Error, table: &str, operation: &str) -> Error {
    if err.is_storage_failure() {
        err
    } else {
        err.context(Error::storage_failure_with(table, operation))
    }
}
