//! DDL files on disk
//!
//! The CLI reads `SHOW CREATE TABLE` output saved to `.sql` files, one table
//! per file, either a single file or every `.sql` file under a directory.

use std::path::{Path, PathBuf};

use anyhow::Result;
use encoding_rs::WINDOWS_1252;

use crate::error::DbMetaError;

/// Collect the DDL files to inspect.
///
/// A file path is returned as-is. A directory is walked for `*.sql` files,
/// optionally keeping only paths matching the `include` glob (relative to
/// the directory). Results are sorted.
pub fn collect_ddl_files(path: &Path, include: Option<&str>) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let matcher = include.map(glob::Pattern::new).transpose()?;

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "sql"))
        .filter(|p| match &matcher {
            Some(matcher) => p
                .strip_prefix(path)
                .map_or(false, |relative| matcher.matches_path(relative)),
            None => true,
        })
        .collect();

    if files.is_empty() {
        return Err(DbMetaError::NoDdlFiles {
            path: path.to_path_buf(),
        }
        .into());
    }

    files.sort();
    Ok(files)
}

/// Read a DDL file, trying UTF-8 first, then Windows-1252 as fallback.
///
/// A UTF-8 byte order mark is stripped.
pub fn read_ddl_file(path: &Path) -> Result<String, DbMetaError> {
    let bytes = std::fs::read(path).map_err(|e| DbMetaError::DdlFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(err) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(err.as_bytes());
            if had_errors {
                return Err(DbMetaError::DdlDecode {
                    path: path.to_path_buf(),
                });
            }
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
