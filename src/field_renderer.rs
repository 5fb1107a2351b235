//! Renders business fields into the aligned blocks that fill
//! `{TplColumnCreate}` in the logic and model templates.

use crate::column_mapping::TypeMapper;
use crate::naming::{to_camel, to_camel_lower};
use crate::table_writer::{TableWriter, NO_PAD_MARKER};
use crate::types::{RenderedBlock, TableField};
use crate::GenerationError;

/// Indent of the `do.X{ ... }` literal body inside the logic template.
const LOGIC_INDENT: &str = "            ";
/// Indent of struct fields inside the model template.
const MODEL_INDENT: &str = "    ";

/// `Name: in.Name,` assignments for the logic layer.
pub fn render_logic_fields(fields: &[TableField]) -> RenderedBlock {
    let mut writer = TableWriter::new();

    writer.append_bulk(fields.iter().map(|field: &TableField| {
        let name = to_camel(&field.name);
        vec![
            format!("{}{}{}:", NO_PAD_MARKER, LOGIC_INDENT, name),
            format!("in.{},", name),
        ]
    }));

    RenderedBlock {
        content: writer.render(),
        required_imports: Vec::new(),
    }
}

/// Struct field declarations for the model layer, plus the imports their
/// types need.
pub fn render_model_fields(
    fields: &[TableField],
    types: &TypeMapper,
) -> Result<RenderedBlock, GenerationError> {
    let mut writer = TableWriter::new();
    let mut required_imports: Vec<String> = Vec::new();

    for field in fields {
        let go_type = types.map(field)?;
        if let Some(import) = go_type.import {
            if !required_imports.iter().any(|seen| seen == import) {
                required_imports.push(import.to_string());
            }
        }

        let mut row = vec![
            format!("{}{}{}", NO_PAD_MARKER, MODEL_INDENT, to_camel(&field.name)),
            go_type.name.to_string(),
            format!("`json:\"{}\"`", to_camel_lower(&field.name)),
        ];
        let comment = format_comment(&field.comment);
        if !comment.is_empty() {
            row.push(format!("// {}", comment));
        }
        writer.append(row);
    }

    Ok(RenderedBlock {
        content: writer.render(),
        required_imports,
    })
}

/// Collapses a column comment onto one line.
fn format_comment(comment: &str) -> String {
    comment.split_whitespace().collect::<Vec<&str>>().join(" ")
}
