use crate::types::{FieldMap, TableField};
use serde_derive::Deserialize;

/// Columns every table carries that never become business fields.
pub const BASE_COLUMNS: [&str; 4] = ["id", "created_at", "updated_at", "deleted_at"];

/// Order of generated fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrder {
    /// Lexicographic by column name
    #[default]
    Name,
    /// As declared in the table, ties broken by name
    Declaration,
}

/// Drops the base columns; exact, case-sensitive match only.
pub fn exclude_base_columns(field_map: FieldMap) -> FieldMap {
    field_map
        .into_iter()
        .filter(|(name, _)| !BASE_COLUMNS.contains(&name.as_str()))
        .collect()
}

pub fn sort_for_generation(field_map: FieldMap, order: FieldOrder) -> Vec<TableField> {
    let mut fields: Vec<TableField> = field_map.into_values().collect();

    match order {
        FieldOrder::Name => fields.sort_by(|a, b| a.name.cmp(&b.name)),
        FieldOrder::Declaration => {
            fields.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)))
        }
    }

    fields
}

/// The fields a table contributes to generated code, in generation order.
pub fn business_fields(field_map: FieldMap, order: FieldOrder) -> Vec<TableField> {
    sort_for_generation(exclude_base_columns(field_map), order)
}
