//! SQL column type -> Go type used in generated model structs.

use crate::types::TableField;
use crate::GenerationError;
use serde_derive::Deserialize;

pub const GTIME_IMPORT: &str = "github.com/gogf/gf/v2/os/gtime";
pub const GJSON_IMPORT: &str = "github.com/gogf/gf/v2/encoding/gjson";

/// A Go type and the package it needs, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoType {
    pub name: &'static str,
    pub import: Option<&'static str>,
}

impl GoType {
    const fn plain(name: &'static str) -> Self {
        Self { name, import: None }
    }

    const fn imported(name: &'static str, import: &'static str) -> Self {
        Self {
            name,
            import: Some(import),
        }
    }
}

const FALLBACK: GoType = GoType::plain("string");

/// What to do with a SQL type missing from the lookup table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTypePolicy {
    /// Log a warning and use `string`
    #[default]
    Fallback,
    /// Fail the table
    Error,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TypeMapper {
    pub unknown_types: UnknownTypePolicy,
}

impl TypeMapper {
    pub fn new(unknown_types: UnknownTypePolicy) -> Self {
        Self { unknown_types }
    }

    pub fn map(&self, field: &TableField) -> Result<GoType, GenerationError> {
        if let Some(go_type) = lookup(&field.sql_type) {
            return Ok(go_type);
        }

        match self.unknown_types {
            UnknownTypePolicy::Fallback => {
                log::warn!(
                    "unknown sql type \"{}\" for column \"{}\", using {}",
                    field.sql_type,
                    field.name,
                    FALLBACK.name
                );
                Ok(FALLBACK)
            }
            UnknownTypePolicy::Error => Err(GenerationError::UnknownSqlType {
                column: field.name.clone(),
                sql_type: field.sql_type.clone(),
            }),
        }
    }
}

struct SqlType {
    base: String, // lowercase, modifiers removed: "int", "double precision"
    size: Option<u32>,
    unsigned: bool,
}

fn parse(sql_type: &str) -> SqlType {
    let lower = sql_type.trim().to_lowercase();
    let (head, size) = match (lower.find('('), lower.find(')')) {
        (Some(open), Some(close)) if open < close => {
            let size = lower[open + 1..close]
                .split(',')
                .next()
                .and_then(|n| n.trim().parse::<u32>().ok());
            (format!("{} {}", &lower[..open], &lower[close + 1..]), size)
        }
        _ => (lower.clone(), None),
    };

    let words: Vec<&str> = head
        .split_whitespace()
        .filter(|word| !matches!(*word, "unsigned" | "zerofill" | "signed"))
        .collect();

    SqlType {
        base: words.join(" "),
        size,
        unsigned: lower.contains("unsigned"),
    }
}

fn lookup_base(base: &str, size: Option<u32>, unsigned: bool) -> Option<GoType> {
    let go_type = match base {
        "bit" if size == Some(1) => GoType::plain("bool"),
        "bit" | "bigint" | "int8" | "bigserial" => {
            if unsigned {
                GoType::plain("uint64")
            } else {
                GoType::plain("int64")
            }
        }
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "int2" | "int4" | "serial"
        | "smallserial" | "year" => {
            if unsigned {
                GoType::plain("uint")
            } else {
                GoType::plain("int")
            }
        }
        "bool" | "boolean" => GoType::plain("bool"),
        "float" | "double" | "double precision" | "real" | "decimal" | "numeric" | "money"
        | "smallmoney" | "float4" | "float8" => GoType::plain("float64"),
        "char" | "varchar" | "character" | "character varying" | "nchar" | "nvarchar"
        | "text" | "tinytext" | "mediumtext" | "longtext" | "ntext" | "clob" | "enum" | "set"
        | "uuid" | "string" => GoType::plain("string"),
        "binary" | "varbinary" | "blob" | "tinyblob" | "mediumblob" | "longblob" | "bytea" => {
            GoType::plain("[]byte")
        }
        "date" | "datetime" | "datetime2" | "smalldatetime" | "timestamp" | "timestamptz"
        | "time" | "timetz" => GoType::imported("*gtime.Time", GTIME_IMPORT),
        "json" | "jsonb" => GoType::imported("*gjson.Json", GJSON_IMPORT),
        _ => return None,
    };

    Some(go_type)
}

/// Looks a declared SQL type up in the mapping table.
///
/// Length, precision and `unsigned`/`zerofill` modifiers are understood; a
/// multi-word type that is not listed is retried by its first word, so
/// `timestamp with time zone` maps like `timestamp`.
pub fn lookup(sql_type: &str) -> Option<GoType> {
    let parsed = parse(sql_type);

    lookup_base(&parsed.base, parsed.size, parsed.unsigned).or_else(|| {
        parsed
            .base
            .split_whitespace()
            .next()
            .filter(|first| *first != parsed.base)
            .and_then(|first| lookup_base(first, parsed.size, parsed.unsigned))
    })
}
