use super::TableIntrospector;
use crate::types::{field_map, FieldMap, TableField};
use crate::GenerationError;
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;

// information_schema columns are cast to CHAR so they decode as text on
// servers that report them as binary
const LIST_TABLES: &str = "SELECT CAST(TABLE_NAME AS CHAR) AS name \
     FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_TYPE = 'BASE TABLE' \
     ORDER BY TABLE_NAME";

const TABLE_COLUMNS: &str = "SELECT \
         CAST(ORDINAL_POSITION AS UNSIGNED) AS position, \
         CAST(COLUMN_NAME AS CHAR) AS name, \
         CAST(COLUMN_TYPE AS CHAR) AS sql_type, \
         CAST(IS_NULLABLE AS CHAR) AS nullable, \
         CAST(COLUMN_KEY AS CHAR) AS column_key, \
         CAST(COLUMN_COMMENT AS CHAR) AS comment \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

/// MySQL tables and columns from `information_schema`, including comments.
pub struct MySqlIntrospector {
    pool: MySqlPool,
}

impl MySqlIntrospector {
    pub async fn connect(link: &str) -> Result<Self, GenerationError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(link)
            .await?;

        Ok(Self { pool })
    }
}

fn parse_column(row: &MySqlRow) -> Result<TableField, sqlx::Error> {
    let position: u64 = row.try_get("position")?;
    let nullable: String = row.try_get("nullable")?;
    let column_key: String = row.try_get("column_key")?;

    Ok(TableField {
        index: position.saturating_sub(1) as usize,
        name: row.try_get("name")?,
        sql_type: row.try_get("sql_type")?,
        nullable: nullable.eq_ignore_ascii_case("YES"),
        comment: row.try_get("comment")?,
        is_primary_key: column_key == "PRI",
    })
}

#[async_trait(?Send)]
impl TableIntrospector for MySqlIntrospector {
    async fn list_tables(&self) -> Result<Vec<String>, GenerationError> {
        let rows: Vec<MySqlRow> = sqlx::query(LIST_TABLES).fetch_all(&self.pool).await?;

        let tables = rows
            .iter()
            .map(|row: &MySqlRow| row.try_get::<String, _>("name"))
            .collect::<Result<Vec<String>, sqlx::Error>>()?;

        Ok(tables)
    }

    async fn table_fields(&self, table: &str) -> Result<FieldMap, GenerationError> {
        let rows: Vec<MySqlRow> = sqlx::query(TABLE_COLUMNS)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Err(GenerationError::TableNotFound(table.to_string()));
        }

        let fields = rows
            .iter()
            .map(parse_column)
            .collect::<Result<Vec<TableField>, sqlx::Error>>()?;

        Ok(field_map(fields))
    }
}
