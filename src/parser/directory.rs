use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::conversion::Format;

/// Return true if the path is an existing file with the format's extension
pub fn is_format_file(path: &Path, format: Format) -> bool {
    path.is_file() && Format::from_path(path) == Some(format)
}

/// Find files of `format` in a directory. If recursive is true, use walkdir; otherwise list files.
/// Results are sorted so batch output is stable across runs.
pub fn find_source_files(
    dir: &Path,
    format: Format,
    recursive: bool,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            let path = entry.path();
            if is_format_file(path, format) {
                files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if is_format_file(&path, format) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
