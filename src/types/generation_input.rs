use crate::naming;
use std::path::PathBuf;

/// Everything needed to generate the files of one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationInput {
    pub table_name: String,         // as in the database
    pub renamed_table_name: String, // prefix stripped
    pub output_path: PathBuf,       // e.g. <project>/internal
    pub import_prefix: String,      // Go import path of output_path
    pub base_model_import_prefix: Option<String>, // None when unresolved
    pub logic_template: Option<PathBuf>,
    pub model_template: Option<PathBuf>,
}

impl GenerationInput {
    pub fn names(&self) -> TableNames {
        TableNames::new(&self.renamed_table_name)
    }

    /// `<output>/model/<file>.go`
    pub fn model_file(&self) -> PathBuf {
        self.output_path
            .join("model")
            .join(format!("{}.go", self.names().file_name))
    }

    /// `<output>/logic/<renamed>/<file>.go`
    pub fn logic_file(&self) -> PathBuf {
        self.output_path
            .join("logic")
            .join(&self.renamed_table_name)
            .join(format!("{}.go", self.names().file_name))
    }
}

/// Case variants of a (renamed) table name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableNames {
    pub camel: String,       // UserProfile
    pub camel_lower: String, // userProfile
    pub snake: String,       // user_profile
    pub file_name: String,   // snake, trimmed of -_.
}

impl TableNames {
    pub fn new(name: &str) -> Self {
        let snake = naming::to_snake(name);

        Self {
            camel: naming::to_camel(name),
            camel_lower: naming::to_camel_lower(name),
            file_name: naming::file_name(&snake),
            snake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(renamed: &str) -> GenerationInput {
        GenerationInput {
            table_name: format!("t_{}", renamed),
            renamed_table_name: renamed.to_string(),
            output_path: PathBuf::from("/project/internal"),
            import_prefix: "demo/internal".to_string(),
            base_model_import_prefix: Some("demo/utility/base_model".to_string()),
            logic_template: None,
            model_template: None,
        }
    }

    #[test]
    fn files_follow_project_layout() {
        let input = input("user_profile");

        assert_eq!(
            input.model_file(),
            PathBuf::from("/project/internal/model/user_profile.go")
        );
        assert_eq!(
            input.logic_file(),
            PathBuf::from("/project/internal/logic/user_profile/user_profile.go")
        );
    }

    #[test]
    fn file_name_is_trimmed() {
        let names = TableNames::new("_user_");

        assert_eq!(names.file_name, "user");
        assert_eq!(names.camel, "User");
    }

    #[test]
    fn names_cover_all_cases() {
        let names = TableNames::new("user_profile");

        assert_eq!(names.camel, "UserProfile");
        assert_eq!(names.camel_lower, "userProfile");
        assert_eq!(names.snake, "user_profile");
    }
}
