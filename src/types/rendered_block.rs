/// A block of aligned source lines plus the imports its types need.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedBlock {
    pub content: String,
    pub required_imports: Vec<String>, // import paths, first-seen order, no duplicates
}

impl RenderedBlock {
    /// Import lines ready to drop into a Go `import ( ... )` block.
    pub fn import_lines(&self) -> String {
        self.required_imports
            .iter()
            .map(|path: &String| format!("\t\"{}\"", path))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_lines_are_quoted_and_indented() {
        let block = RenderedBlock {
            content: String::new(),
            required_imports: vec![
                "github.com/gogf/gf/v2/os/gtime".into(),
                "github.com/gogf/gf/v2/encoding/gjson".into(),
            ],
        };

        assert_eq!(
            block.import_lines(),
            "\t\"github.com/gogf/gf/v2/os/gtime\"\n\t\"github.com/gogf/gf/v2/encoding/gjson\""
        );
    }

    #[test]
    fn no_imports_renders_empty() {
        assert_eq!(RenderedBlock::default().import_lines(), "");
    }
}
