//! Drives generation of the model and logic files, one table at a time.

use crate::column_mapping::TypeMapper;
use crate::config::{ErrorPolicy, GenConfig};
use crate::database_schema::TableIntrospector;
use crate::field_filter;
use crate::field_renderer::{render_logic_fields, render_model_fields};
use crate::file_writer::{FileWriter, WriteOutcome};
use crate::go_mod;
use crate::naming;
use crate::template::{
    self, DefaultVars, TemplateVar, TemplateVars, DEFAULT_LOGIC_TEMPLATE, DEFAULT_MODEL_TEMPLATE,
};
use crate::types::{GenerationInput, TableField, TableNames};
use crate::GenerationError;
use std::path::{Path, PathBuf};

/// `utility/base_model`, relative to the project root.
const BASE_MODEL_DIR: [&str; 2] = ["utility", "base_model"];

/// Files touched for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub files: Vec<(PathBuf, WriteOutcome)>,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub tables: Vec<TableReport>,
    /// Tables that failed under [`ErrorPolicy::Continue`].
    pub failures: Vec<(String, GenerationError)>,
}

impl GenerationReport {
    pub fn created(&self) -> usize {
        self.count(WriteOutcome::Created)
    }

    pub fn skipped(&self) -> usize {
        self.count(WriteOutcome::Skipped)
    }

    fn count(&self, outcome: WriteOutcome) -> usize {
        self.tables
            .iter()
            .flat_map(|table| table.files.iter())
            .filter(|(_, file_outcome)| *file_outcome == outcome)
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct LogicGenerator<'a> {
    introspector: &'a dyn TableIntrospector,
    config: &'a GenConfig,
    project_root: PathBuf,
    writer: FileWriter,
    types: TypeMapper,
    defaults: DefaultVars,
}

impl<'a> LogicGenerator<'a> {
    /// `project_root` anchors the output `path`, the default import prefixes
    /// and relative template paths.
    pub fn new(
        introspector: &'a dyn TableIntrospector,
        config: &'a GenConfig,
        project_root: &Path,
    ) -> Self {
        Self {
            introspector,
            config,
            project_root: project_root.to_path_buf(),
            writer: FileWriter::new(config.formatter()),
            types: TypeMapper::new(config.unknown_types),
            defaults: DefaultVars::now(config.with_time),
        }
    }

    /// Pins the timestamp used for `{TplDatetimeStr}`.
    pub fn with_defaults(mut self, defaults: DefaultVars) -> Self {
        self.defaults = defaults;
        self
    }

    pub async fn generate(&self) -> Result<GenerationReport, GenerationError> {
        let tables = self.resolve_tables().await?;
        log::debug!("tables to generate: {:?}", tables);

        let inputs = self.prepare_inputs(&tables)?;
        let mut report = GenerationReport::default();

        for input in &inputs {
            match self.generate_table(input).await {
                Ok(table_report) => report.tables.push(table_report),
                Err(err) => match self.config.on_error {
                    ErrorPolicy::Abort => return Err(err),
                    ErrorPolicy::Continue => {
                        log::error!("{}", err);
                        report.failures.push((input.table_name.clone(), err));
                    }
                },
            }
        }

        Ok(report)
    }

    /// Configured tables in order, or every table when none are configured,
    /// minus `tables_ex`.
    async fn resolve_tables(&self) -> Result<Vec<String>, GenerationError> {
        let tables = if self.config.tables.is_empty() {
            self.introspector.list_tables().await?
        } else {
            self.config.tables.clone()
        };

        Ok(tables
            .into_iter()
            .map(|table: String| table.trim().to_string())
            .filter(|table: &String| !table.is_empty() && !self.config.tables_ex.contains(table))
            .collect())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }

    /// From `go.mod` when there is one, else rebased from `import_prefix`.
    /// `None` leaves `{TplBaseModelImportPrefix}` unbound, which only fails
    /// templates that use it.
    fn base_model_import(&self, import_prefix: &str) -> Option<String> {
        let dir = BASE_MODEL_DIR
            .iter()
            .fold(self.project_root.clone(), |dir, part| dir.join(part));

        match go_mod::import_path(&dir) {
            Ok(path) => Some(path),
            Err(err) => {
                let derived = go_mod::sibling_import(import_prefix, &self.config.path, &BASE_MODEL_DIR);
                if derived.is_none() {
                    log::warn!("{}; set `base_model_import` to generate base model imports", err);
                }
                derived
            }
        }
    }

    pub fn prepare_inputs(&self, tables: &[String]) -> Result<Vec<GenerationInput>, GenerationError> {
        let output_path = self.resolve(&self.config.path);

        let import_prefix = match &self.config.import_prefix {
            Some(prefix) if !prefix.is_empty() => prefix.trim_end_matches('/').to_string(),
            _ => go_mod::import_path(&output_path)?,
        };
        let base_model_import_prefix = match &self.config.base_model_import {
            Some(prefix) if !prefix.is_empty() => Some(prefix.trim_end_matches('/').to_string()),
            _ => self.base_model_import(&import_prefix),
        };
        log::debug!("import prefix: {}", import_prefix);

        let template = |path: &Option<PathBuf>| {
            path.as_ref()
                .filter(|path| !path.as_os_str().is_empty())
                .map(|path| self.resolve(path))
        };

        Ok(tables
            .iter()
            .map(|table: &String| GenerationInput {
                table_name: table.clone(),
                renamed_table_name: naming::strip_prefix(table, &self.config.remove_prefix),
                output_path: output_path.clone(),
                import_prefix: import_prefix.clone(),
                base_model_import_prefix: base_model_import_prefix.clone(),
                logic_template: template(&self.config.template_logic),
                model_template: template(&self.config.template_model),
            })
            .collect())
    }

    /// Fetches the table's fields, then writes the model file and the logic
    /// file. Nothing is written when the fields cannot be fetched.
    pub async fn generate_table(&self, input: &GenerationInput) -> Result<TableReport, GenerationError> {
        let field_map = self
            .introspector
            .table_fields(&input.table_name)
            .await
            .map_err(|source| GenerationError::fetch_fields(&input.table_name, source))?;

        let names = input.names();
        let fields = field_filter::business_fields(field_map, self.config.field_order);

        let model = self.generate_model(input, &names, &fields)?;
        let logic = self.generate_logic(input, &names, &fields)?;

        Ok(TableReport {
            table: input.table_name.clone(),
            files: vec![model, logic],
        })
    }

    fn table_vars(&self, input: &GenerationInput, names: &TableNames) -> TemplateVars {
        let vars = TemplateVars::new()
            .set(TemplateVar::ImportPrefix, input.import_prefix.as_str())
            .set(TemplateVar::TableName, input.table_name.as_str())
            .set(TemplateVar::TableNameCamelCase, names.camel.as_str())
            .set(TemplateVar::TableNameCamelLowerCase, names.camel_lower.as_str())
            .set(TemplateVar::PageListSearch, "");

        match &input.base_model_import_prefix {
            Some(prefix) => vars.set(TemplateVar::BaseModelImportPrefix, prefix.as_str()),
            None => vars,
        }
    }

    /// Defaults go into the template text first; table values are inserted
    /// last and never rescanned.
    fn render(&self, template: &str, vars: &TemplateVars) -> Result<String, GenerationError> {
        let template = template::apply_defaults(template, &self.defaults)?;
        template::render(&template, vars)
    }

    fn generate_model(
        &self,
        input: &GenerationInput,
        names: &TableNames,
        fields: &[TableField],
    ) -> Result<(PathBuf, WriteOutcome), GenerationError> {
        let path = input.model_file();
        if path.exists() {
            return Ok(skipped(path));
        }

        let block = render_model_fields(fields, &self.types)?;
        let vars = self
            .table_vars(input, names)
            .set(TemplateVar::ColumnCreate, block.content.trim_end())
            .set(TemplateVar::PackageImports, block.import_lines());

        let template = template::load_template(input.model_template.as_deref(), DEFAULT_MODEL_TEMPLATE)?;
        let content = self.render(&template, &vars)?;

        let outcome = self.writer.write_if_absent(&path, &content)?;
        Ok((path, outcome))
    }

    fn generate_logic(
        &self,
        input: &GenerationInput,
        names: &TableNames,
        fields: &[TableField],
    ) -> Result<(PathBuf, WriteOutcome), GenerationError> {
        let path = input.logic_file();
        if path.exists() {
            return Ok(skipped(path));
        }

        let block = render_logic_fields(fields);
        let vars = self
            .table_vars(input, names)
            .set(TemplateVar::ColumnCreate, block.content.trim_end())
            .set(TemplateVar::PackageImports, "");

        let template = template::load_template(input.logic_template.as_deref(), DEFAULT_LOGIC_TEMPLATE)?;
        let content = self.render(&template, &vars)?;

        let outcome = self.writer.write_if_absent(&path, &content)?;
        Ok((path, outcome))
    }
}

/// Existing files are left alone before anything is rendered for them.
fn skipped(path: PathBuf) -> (PathBuf, WriteOutcome) {
    log::debug!("skipped existing: {}", path.display());
    (path, WriteOutcome::Skipped)
}
