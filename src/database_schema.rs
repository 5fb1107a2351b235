//! Table introspection: which tables exist and what columns they have.

mod mysql;
mod sqlite;

use crate::types::FieldMap;
use crate::GenerationError;
use async_trait::async_trait;

pub use mysql::MySqlIntrospector;
pub use sqlite::SqliteIntrospector;

#[async_trait(?Send)]
pub trait TableIntrospector: Send + Sync {
    /// All table names, sorted.
    async fn list_tables(&self) -> Result<Vec<String>, GenerationError>;

    /// Column metadata of one table; an unknown table is
    /// [`GenerationError::TableNotFound`].
    async fn table_fields(&self, table: &str) -> Result<FieldMap, GenerationError>;
}

/// Opens the database named by `link` and returns its introspector.
pub async fn connect(link: &str) -> Result<Box<dyn TableIntrospector>, GenerationError> {
    if link.starts_with("sqlite:") {
        Ok(Box::new(SqliteIntrospector::connect(link).await?))
    } else if link.starts_with("mysql://") {
        Ok(Box::new(MySqlIntrospector::connect(link).await?))
    } else {
        Err(GenerationError::UnsupportedDatabase(link.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_unknown_schemes() {
        let err = connect("postgres://localhost/shop").await.err().unwrap();

        assert!(matches!(err, GenerationError::UnsupportedDatabase(_)));
    }

    #[tokio::test]
    async fn connects_sqlite_links() {
        assert!(connect("sqlite::memory:").await.is_ok());
    }

    #[tokio::test]
    async fn introspects_sqlite_tables() {
        let sqlite = SqliteIntrospector::connect("sqlite::memory:").await.unwrap();

        sqlx::query(
            "CREATE TABLE t_user (
                id INTEGER PRIMARY KEY,
                name VARCHAR(64) NOT NULL,
                born_at DATETIME,
                created_at DATETIME
            )",
        )
        .execute(sqlite.pool())
        .await
        .unwrap();

        assert_eq!(sqlite.list_tables().await.unwrap(), vec!["t_user"]);

        let fields = sqlite.table_fields("t_user").await.unwrap();
        assert_eq!(fields.len(), 4);

        let id = &fields["id"];
        assert!(id.is_primary_key);
        assert!(!id.nullable);
        assert_eq!(id.index, 0);

        let name = &fields["name"];
        assert_eq!(name.sql_type, "VARCHAR(64)");
        assert!(!name.nullable);
        assert_eq!(name.index, 1);

        assert!(fields["born_at"].nullable);

        assert!(matches!(
            sqlite.table_fields("missing").await,
            Err(GenerationError::TableNotFound(_))
        ));
    }
}
