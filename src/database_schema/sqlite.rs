use super::TableIntrospector;
use crate::types::{field_map, FieldMap, TableField};
use crate::GenerationError;
use async_trait::async_trait;
use sea_schema::sqlite::def::{Schema, TableDef};
use sea_schema::sqlite::discovery::SchemaDiscovery;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

/// SQLite tables via `sea-schema` discovery, columns via `PRAGMA table_info`.
pub struct SqliteIntrospector {
    pool: SqlitePool,
}

impl SqliteIntrospector {
    pub async fn connect(link: &str) -> Result<Self, GenerationError> {
        // one connection: `sqlite::memory:` is private to its connection
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(link)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_column(row: &SqliteRow) -> Result<TableField, sqlx::Error> {
    let index: i64 = row.try_get("cid")?;
    let not_null: i64 = row.try_get("notnull")?;
    let primary_key: i64 = row.try_get("pk")?;

    Ok(TableField {
        index: index as usize,
        name: row.try_get("name")?,
        sql_type: row.try_get("type")?,
        nullable: not_null == 0 && primary_key == 0,
        comment: String::new(),
        is_primary_key: primary_key > 0,
    })
}

#[async_trait(?Send)]
impl TableIntrospector for SqliteIntrospector {
    async fn list_tables(&self) -> Result<Vec<String>, GenerationError> {
        let schema_discovery = SchemaDiscovery::new(self.pool.clone());

        let schema: Schema = schema_discovery
            .discover()
            .await
            .map_err(|err| GenerationError::Discovery(format!("{:?}", err)))?;

        let mut tables: Vec<String> = schema
            .tables
            .iter()
            .map(|table: &TableDef| table.name.clone())
            .filter(|name: &String| !name.starts_with("sqlite_"))
            .collect();
        tables.sort();

        Ok(tables)
    }

    async fn table_fields(&self, table: &str) -> Result<FieldMap, GenerationError> {
        let sql = format!("PRAGMA table_info(\"{}\")", table.replace('"', "\"\""));
        let rows: Vec<SqliteRow> = sqlx::query(&sql).fetch_all(&self.pool).await?;

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
