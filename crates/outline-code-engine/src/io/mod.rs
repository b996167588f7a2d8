use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a source file and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write buffer content back to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// Mode identifier for a file, derived from its extension.
///
/// Unknown extensions fall back to `fundamental-mode`, which no language
/// pattern is registered for.
pub fn mode_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("py") => "python-mode",
        Some("el") => "emacs-lisp-mode",
        Some("rs") => "rust-mode",
        Some("js" | "mjs" | "cjs") => "javascript-mode",
        Some("sh" | "bash") => "sh-mode",
        Some("rb") => "ruby-mode",
        Some("org") => "org-mode",
        _ => "fundamental-mode",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.py");

        let err = read_file(&missing).unwrap_err();

        assert!(matches!(err, IoError::NotFound(path) if path == missing));
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("script.py");

        write_file(&path, "def foo():\n    pass\n").unwrap();

        assert_eq!(read_file(&path).unwrap(), "def foo():\n    pass\n");
    }

    #[rstest]
    #[case("script.py", "python-mode")]
    #[case("init.el", "emacs-lisp-mode")]
    #[case("main.rs", "rust-mode")]
    #[case("app.mjs", "javascript-mode")]
    #[case("build.sh", "sh-mode")]
    #[case("notes.org", "org-mode")]
    #[case("README", "fundamental-mode")]
    fn test_mode_for_path(#[case] file: &str, #[case] mode: &str) {
        assert_eq!(mode_for_path(Path::new(file)), mode);
    }
}
