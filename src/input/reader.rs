use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const MAX_INPUT_SIZE: u64 = 64 * 1024 * 1024; // 64 MiB

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a .docx file: {}\n\nOnly Word documents (.docx) can be translated.", .0.display())]
    NotDocx(PathBuf),

    #[error(
        "Input size ({:.1} MB) exceeds maximum allowed size (64 MB): {}",
        megabytes(.size),
        .path.display()
    )]
    TooLarge { path: PathBuf, size: u64 },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn megabytes(size: &u64) -> f64 {
    *size as f64 / 1024.0 / 1024.0
}

pub struct InputReader;

impl InputReader {
    /// Checks that `path` names a readable `.docx` within the size limit.
    pub fn validate(path: &Path) -> Result<u64, InputError> {
        let is_docx = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
        if !is_docx {
            return Err(InputError::NotDocx(path.to_path_buf()));
        }

        let metadata = fs::metadata(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                InputError::NotFound(path.to_path_buf())
            } else {
                InputError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        if !metadata.is_file() {
            return Err(InputError::NotFound(path.to_path_buf()));
        }

        let size = metadata.len();
        if size > MAX_INPUT_SIZE {
            return Err(InputError::TooLarge {
                path: path.to_path_buf(),
                size,
            });
        }
        Ok(size)
    }

    pub fn read(path: &Path) -> Result<Vec<u8>, InputError> {
        Self::validate(path)?;
        fs::read(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `report.docx` becomes `report_Translated.docx` in the same directory.
    pub fn default_output_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map_or_else(|| "document".into(), |s| s.to_string_lossy());
        input.with_file_name(format!("{stem}_Translated.docx"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_docx() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.docx");
        fs::write(&path, b"PK\x03\x04").unwrap();
        assert_eq!(InputReader::read(&path).unwrap(), b"PK\x03\x04");
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("A.DOCX");
        fs::write(&path, b"x").unwrap();
        assert!(InputReader::validate(&path).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = InputReader::read(Path::new("/nonexistent/report.docx")).unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
    }

    #[test]
    fn test_wrong_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "hi").unwrap();
        assert!(matches!(
            InputReader::read(&path).unwrap_err(),
            InputError::NotDocx(_)
        ));
    }

    #[test]
    fn test_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.docx");
        let file = fs::File::create(&path).unwrap();
        file.set_len(MAX_INPUT_SIZE + 1).unwrap();

        let err = InputReader::validate(&path).unwrap_err();
        assert!(matches!(err, InputError::TooLarge { .. }));
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            InputReader::default_output_path(Path::new("/docs/Rapor 2024.docx")),
            PathBuf::from("/docs/Rapor 2024_Translated.docx")
        );
    }
}
