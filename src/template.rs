//! Placeholder substitution for the logic and model templates.
//!
//! A placeholder is `{Tpl<Name>}` where `<Name>` is one of [`TemplateVar`].
//! Substitution is literal; there is no expression language. Tokens that look
//! like placeholders but name no known variable are rejected instead of being
//! copied into generated code.

use crate::GenerationError;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOGIC_TEMPLATE: &str = include_str!("templates/logic.go.tpl");
pub const DEFAULT_MODEL_TEMPLATE: &str = include_str!("templates/model.go.tpl");

const OPEN: &str = "{Tpl";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateVar {
    ImportPrefix,
    TableName,
    TableNameCamelCase,
    TableNameCamelLowerCase,
    ColumnCreate,
    PageListSearch,
    BaseModelImportPrefix,
    PackageImports,
    DatetimeStr,
    CreatedAtDatetimeStr,
}

impl TemplateVar {
    pub const ALL: [TemplateVar; 10] = [
        TemplateVar::ImportPrefix,
        TemplateVar::TableName,
        TemplateVar::TableNameCamelCase,
        TemplateVar::TableNameCamelLowerCase,
        TemplateVar::ColumnCreate,
        TemplateVar::PageListSearch,
        TemplateVar::BaseModelImportPrefix,
        TemplateVar::PackageImports,
        TemplateVar::DatetimeStr,
        TemplateVar::CreatedAtDatetimeStr,
    ];

    /// The name between `{` and `}`.
    pub fn token(self) -> &'static str {
        match self {
            TemplateVar::ImportPrefix => "TplImportPrefix",
            TemplateVar::TableName => "TplTableName",
            TemplateVar::TableNameCamelCase => "TplTableNameCamelCase",
            TemplateVar::TableNameCamelLowerCase => "TplTableNameCamelLowerCase",
            TemplateVar::ColumnCreate => "TplColumnCreate",
            TemplateVar::PageListSearch => "TplPageListSearch",
            TemplateVar::BaseModelImportPrefix => "TplBaseModelImportPrefix",
            TemplateVar::PackageImports => "TplPackageImports",
            TemplateVar::DatetimeStr => "TplDatetimeStr",
            TemplateVar::CreatedAtDatetimeStr => "TplCreatedAtDatetimeStr",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|var| var.token() == token)
    }

    /// Filled by [`apply_defaults`] rather than per table.
    pub fn is_default(self) -> bool {
        matches!(
            self,
            TemplateVar::DatetimeStr | TemplateVar::CreatedAtDatetimeStr
        )
    }
}

/// Values bound to template variables for one render.
#[derive(Clone, Debug, Default)]
pub struct TemplateVars {
    values: BTreeMap<TemplateVar, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<S: Into<String>>(mut self, var: TemplateVar, value: S) -> Self {
        self.values.insert(var, value.into());
        self
    }

    pub fn get(&self, var: TemplateVar) -> Option<&str> {
        self.values.get(&var).map(String::as_str)
    }
}

/// Framework defaults, substituted into the template text before the
/// per-table values.
#[derive(Clone, Debug)]
pub struct DefaultVars {
    pub datetime: String,
    pub with_time: bool,
}

impl DefaultVars {
    pub fn now(with_time: bool) -> Self {
        Self {
            datetime: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            with_time,
        }
    }

    fn vars(&self) -> TemplateVars {
        let created_at = if self.with_time {
            format!("Created at {}", self.datetime)
        } else {
            String::new()
        };

        TemplateVars::new()
            .set(TemplateVar::DatetimeStr, self.datetime.as_str())
            .set(TemplateVar::CreatedAtDatetimeStr, created_at)
    }
}

/// Calls `f` for every `{Tpl...}` token; text in between is copied. A
/// substituted value is never scanned again, so values taken from the
/// database may contain `{Tpl...}` text.
fn substitute<F>(template: &str, mut f: F) -> Result<String, GenerationError>
where
    F: FnMut(TemplateVar) -> Result<Option<String>, GenerationError>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let candidate = &rest[start + 1..];

        let name_len = candidate
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(candidate.len());
        if candidate[name_len..].starts_with('}') {
            let name = &candidate[..name_len];
            let var = TemplateVar::from_token(name)
                .ok_or_else(|| GenerationError::UnknownPlaceholder(name.to_string()))?;
            let token_len = name_len + 2;
            match f(var)? {
                Some(value) => out.push_str(&value),
                None => out.push_str(&rest[start..start + token_len]),
            }
            rest = &rest[start + token_len..];
        } else {
            out.push_str(OPEN);
            rest = &rest[start + OPEN.len()..];
        }
    }
    out.push_str(rest);

    Ok(out)
}

/// Replaces every per-table placeholder with its bound value.
///
/// Default variables without a value are left in place.
pub fn render(template: &str, vars: &TemplateVars) -> Result<String, GenerationError> {
    substitute(template, |var| match vars.get(var) {
        Some(value) => Ok(Some(value.to_string())),
        None if var.is_default() => Ok(None),
        None => Err(GenerationError::MissingVariable(var.token().to_string())),
    })
}

/// Fills the framework default variables and keeps every other placeholder
/// for [`render`]. Runs on the template text, before any table value is in it.
pub fn apply_defaults(template: &str, defaults: &DefaultVars) -> Result<String, GenerationError> {
    let vars = defaults.vars();
    substitute(template, |var| Ok(vars.get(var).map(str::to_string)))
}

/// The override file when a non-empty path is given, otherwise `default`.
pub fn load_template<'a>(
    override_path: Option<&Path>,
    default: &'a str,
) -> Result<Cow<'a, str>, GenerationError> {
    match override_path.filter(|path| !path.as_os_str().is_empty()) {
        Some(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| GenerationError::ReadTemplate {
                path: PathBuf::from(path),
                source,
            }),
        None => Ok(Cow::Borrowed(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table_vars() -> TemplateVars {
        TemplateVars::new()
            .set(TemplateVar::ImportPrefix, "demo/internal")
            .set(TemplateVar::TableName, "t_user")
            .set(TemplateVar::TableNameCamelCase, "User")
            .set(TemplateVar::TableNameCamelLowerCase, "user")
            .set(TemplateVar::ColumnCreate, "Name: in.Name,")
            .set(TemplateVar::PageListSearch, "")
            .set(TemplateVar::BaseModelImportPrefix, "demo/utility/base_model")
            .set(TemplateVar::PackageImports, "")
    }

    #[test]
    fn tokens_round_trip() {
        for var in TemplateVar::ALL {
            assert_eq!(TemplateVar::from_token(var.token()), Some(var));
        }
        assert_eq!(TemplateVar::from_token("TplNope"), None);
    }

    #[test]
    fn substitutes_literally() {
        let out = render("type s{TplTableNameCamelCase} struct{}", &table_vars()).unwrap();

        assert_eq!(out, "type sUser struct{}");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let err = render("x {TplTabelName} y", &table_vars()).unwrap_err();

        assert!(matches!(err, GenerationError::UnknownPlaceholder(ref name) if name == "TplTabelName"));
    }

    #[test]
    fn unbound_variable_is_an_error() {
        let vars = TemplateVars::new().set(TemplateVar::TableName, "user");
        let err = render("{TplTableName} {TplImportPrefix}", &vars).unwrap_err();

        assert!(matches!(err, GenerationError::MissingVariable(ref name) if name == "TplImportPrefix"));
    }

    #[test]
    fn braces_that_are_not_placeholders_are_kept() {
        let text = "m := map[string]int{} // {Tpl or {Tpl-x} {TplTableName";

        assert_eq!(render(text, &table_vars()).unwrap(), text);
    }

    #[test]
    fn defaults_fill_before_table_values() {
        let template = "{TplTableName} {TplCreatedAtDatetimeStr}|{TplDatetimeStr}";
        let without_time = DefaultVars {
            datetime: "2024-01-02 03:04:05".to_string(),
            with_time: false,
        };

        let filled = apply_defaults(template, &without_time).unwrap();
        assert_eq!(filled, "{TplTableName} |2024-01-02 03:04:05");
        assert_eq!(render(&filled, &table_vars()).unwrap(), "t_user |2024-01-02 03:04:05");

        let with_time = DefaultVars {
            with_time: true,
            ..without_time
        };
        assert_eq!(
            apply_defaults(template, &with_time).unwrap(),
            "{TplTableName} Created at 2024-01-02 03:04:05|2024-01-02 03:04:05"
        );
    }

    #[test]
    fn apply_defaults_still_rejects_typos() {
        let defaults = DefaultVars::now(false);

        assert!(matches!(
            apply_defaults("{TplDatetimeStr} {TplTabelName}", &defaults),
            Err(GenerationError::UnknownPlaceholder(_))
        ));
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let vars = table_vars().set(TemplateVar::ColumnCreate, "// {TplTableName} {TplDatetimeStr} {TplNope}");

        let out = render("{TplColumnCreate} {TplTableName}", &vars).unwrap();

        assert_eq!(out, "// {TplTableName} {TplDatetimeStr} {TplNope} t_user");
    }

    #[test]
    fn default_templates_render_cleanly() {
        let defaults = DefaultVars::now(false);
        for template in [DEFAULT_LOGIC_TEMPLATE, DEFAULT_MODEL_TEMPLATE] {
            let text = apply_defaults(template, &defaults).unwrap();
            let text = render(&text, &table_vars()).unwrap();
            assert!(!text.contains("{Tpl"));
        }
    }

    #[test]
    fn override_file_wins_over_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "custom {{TplTableName}}").unwrap();

        let loaded = load_template(Some(file.path()), "default").unwrap();
        assert_eq!(loaded, "custom {TplTableName}");

        assert_eq!(load_template(None, "default").unwrap(), "default");
        assert_eq!(load_template(Some(Path::new("")), "default").unwrap(), "default");
    }

    #[test]
    fn missing_override_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.tpl");

        assert!(matches!(
            load_template(Some(missing.as_path()), "default"),
            Err(GenerationError::ReadTemplate { .. })
        ));
    }
}
