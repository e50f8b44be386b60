use crate::METRIC_TABLE_NAME;

use esinstall_core::{
    schema::{match_field_name, FieldDef, FieldType, Mappings, Model},
    Error, Result,
};

/// Computes the mapping a model needs in the backend.
///
/// `metric_model` adds the [`METRIC_TABLE_NAME`] keyword field that tells
/// apart the rows of metrics sharing one physical table.
pub fn create_mapping(model: &Model, metric_model: bool) -> Result<Mappings> {
    let mut mappings = Mappings::new();

    for column in &model.columns {
        let ty = FieldType::from_column(&column.ty, column.generic_ty.as_ref()).map_err(|err| {
            err.context(Error::invalid_schema(format!(
                "column `{}` of model `{}`",
                column.name, model.name
            )))
        })?;

        match column.match_query {
            Some(analyzer) => {
                let match_name = match_field_name(&column.name);
                insert(
                    &mut mappings,
                    model,
                    &column.name,
                    FieldDef::from(ty).copy_to(&match_name),
                )?;
                insert(
                    &mut mappings,
                    model,
                    &match_name,
                    FieldDef::text(analyzer.name()),
                )?;
            }
            None => {
                let mut field = FieldDef::from(ty);
                // The backend does not accept `index` on binary fields.
                if column.storage_only && ty != FieldType::Binary {
                    field = field.not_indexed();
                }
                insert(&mut mappings, model, &column.name, field)?;
            }
        }

        if column.index_only {
            mappings.exclude(&column.name);
        }
    }

    if metric_model {
        insert(
            &mut mappings,
            model,
            METRIC_TABLE_NAME,
            FieldDef::from(FieldType::Keyword),
        )?;
    }

    tracing::debug!(model = %model.name, ?mappings, "built index mapping");

    Ok(mappings)
}

fn insert(mappings: &mut Mappings, model: &Model, name: &str, field: FieldDef) -> Result<()> {
    if mappings.field(name).is_some() {
        return Err(Error::invalid_schema(format!(
            "field `{name}` is defined twice in model `{}`",
            model.name
        )));
    }
    mappings.insert(name, field);
    Ok(())
}
