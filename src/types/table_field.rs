use std::collections::HashMap;

/// Column metadata as reported by a table introspector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableField {
    pub index: usize,     // declaration position, 0-based
    pub name: String,     // raw column name
    pub sql_type: String, // as declared, e.g. "varchar(255)"
    pub nullable: bool,
    pub comment: String,
    pub is_primary_key: bool,
}

impl TableField {
    pub fn new(index: usize, name: &str, sql_type: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            sql_type: sql_type.to_string(),
            nullable: true,
            comment: String::new(),
            is_primary_key: false,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }
}

/// Column name -> metadata, one per table per run.
pub type FieldMap = HashMap<String, TableField>;

/// Builds a FieldMap from fields listed in declaration order.
pub fn field_map<I>(fields: I) -> FieldMap
where
    I: IntoIterator<Item = TableField>,
{
    fields
        .into_iter()
        .map(|field: TableField| (field.name.clone(), field))
        .collect()
}
