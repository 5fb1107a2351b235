use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating logic and model files
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Column metadata could not be fetched for a table
    #[error("fetching tables fields failed for table \"{table}\": {source}")]
    FetchFields {
        table: String,
        #[source]
        source: Box<GenerationError>,
    },

    /// The introspector returned no columns for the table
    #[error("table \"{0}\" does not exist or has no columns")]
    TableNotFound(String),

    /// Error reported by the database driver
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema discovery failed
    #[error("schema discovery failed: {0}")]
    Discovery(String),

    /// The connection link names a database we cannot introspect
    #[error("unsupported database link \"{0}\", expected sqlite: or mysql://")]
    UnsupportedDatabase(String),

    /// Writing a generated file (or creating its directory) failed
    #[error("writing content to '{}' failed: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template override file could not be read
    #[error("reading template '{}' failed: {source}", path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template contains a `{Tpl...}` token we do not know
    #[error("unknown template placeholder {{{0}}}")]
    UnknownPlaceholder(String),

    /// The template uses a placeholder that was given no value
    #[error("template placeholder {{{0}}} has no value")]
    MissingVariable(String),

    /// A column type is missing from the type mapping table
    #[error("unknown sql type \"{sql_type}\" for column \"{column}\"")]
    UnknownSqlType { column: String, sql_type: String },

    /// No go.mod was found to derive an import path from
    #[error("no go.mod found in '{}' or any parent directory", .0.display())]
    GoModNotFound(PathBuf),

    /// The config file could not be read
    #[error("reading config '{}' failed: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for our schema
    #[error("parsing config failed: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// The merged configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GenerationError {
    pub fn fetch_fields(table: &str, source: GenerationError) -> Self {
        GenerationError::FetchFields {
            table: table.to_string(),
            source: Box::new(source),
        }
    }
}
