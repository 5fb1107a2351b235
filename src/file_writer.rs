use crate::GenerationError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;

/// What happened to a target path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    /// The file already existed and was left untouched.
    Skipped,
}

/// External source formatter run on every created file, e.g. `gofmt -w`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formatter {
    command: Vec<String>,
}

impl Formatter {
    /// `command[0]` is the program, the rest are arguments; the file path is
    /// appended. An empty command disables formatting.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn gofmt() -> Self {
        Self::new(vec!["gofmt".into(), "-w".into()])
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Best effort: failures are logged, never returned.
    pub fn format(&self, path: &Path) {
        let (program, args) = match self.command.split_first() {
            Some(split) => split,
            None => return,
        };

        match process::Command::new(program).args(args).arg(path).output() {
            Ok(output) if output.status.success() => {}
            Ok(output) => log::warn!(
                "{} failed on '{}': {}",
                program,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(err) => log::warn!("running {} on '{}' failed: {}", program, path.display(), err),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FileWriter {
    formatter: Formatter,
}

impl FileWriter {
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }

    /// Writes `content` (trimmed) to `path` unless a file is already there.
    ///
    /// Parent directories are created as needed. The formatter runs only on
    /// files this call created.
    pub fn write_if_absent(&self, path: &Path, content: &str) -> Result<WriteOutcome, GenerationError> {
        if path.exists() {
            log::debug!("skipped existing: {}", path.display());
            return Ok(WriteOutcome::Skipped);
        }

        let write_error = |source: std::io::Error| GenerationError::WriteFile {
            path: PathBuf::from(path),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                log::debug!("skipped existing: {}", path.display());
                return Ok(WriteOutcome::Skipped);
            }
            Err(err) => return Err(write_error(err)),
        };
        file.write_all(content.trim().as_bytes()).map_err(write_error)?;
        drop(file);

        self.formatter.format(path);
        log::info!("generated: {}", path.display());

        Ok(WriteOutcome::Created)
    }
}
