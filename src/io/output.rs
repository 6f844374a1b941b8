//! Write a rendered document to a file or stdout.

use std::io::Write;
use std::path::Path;

use crate::error::AppError;

/// Write `contents` to `path`, or to stdout when `path` is `None` or `-`.
pub fn write_document(path: Option<&Path>, contents: &str) -> Result<(), AppError> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::io(format!("Failed to create output dir '{}': {e}", parent.display()))
                })?;
            }
            std::fs::write(p, contents)
                .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", p.display())))
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| AppError::io(format!("Failed to write to stdout: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_and_creates_parent() {
        let dir = std::env::temp_dir().join("gdp-bars-output-test").join("nested");
        let path = dir.join("chart.svg");
        let _ = std::fs::remove_file(&path);

        write_document(Some(&path), "<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }
}
