use crate::app::error::{Result, RetrieverError};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where and how the generated region is written.
#[derive(Debug, Clone)]
pub struct IndexTarget<'a> {
    pub path: PathBuf,
    pub marker_start: &'a str,
    pub marker_end: &'a str,
    pub title: Option<&'a str>,
}

/// Splits existing content around the marker region. Without both markers
/// (end after start) everything is kept as `before` and nothing follows the
/// region.
pub fn split_markers<'c>(content: &'c str, start: &str, end: &str) -> (&'c str, &'c str) {
    if let Some((before, rest)) = content.split_once(start) {
        if let Some((_, after)) = rest.split_once(end) {
            return (before, after);
        }
    }
    (content, "")
}

pub fn render_index(before: &str, lines: &[String], start: &str, end: &str, after: &str) -> String {
    let mut out = String::new();
    out.push_str(before.trim_end());
    out.push('\n');
    out.push_str(start);
    out.push('\n');
    out.push_str(&lines.join("\n"));
    out.push('\n');
    out.push_str(end);
    out.push('\n');
    out.push_str(after.trim_start());
    out
}

/// Rewrites the marker region of the index file, creating the file if needed.
pub fn write_index(target: &IndexTarget<'_>, lines: &[String]) -> Result<PathBuf> {
    let path = &target.path;

    let existing = if path.exists() {
        Some(fs::read_to_string(path).map_err(|source| RetrieverError::FileRead {
            path: path.clone(),
            source,
        })?)
    } else {
        None
    };

    let (before, after) = match &existing {
        Some(content) => {
            let (before, after) = split_markers(content, target.marker_start, target.marker_end);
            (before.to_string(), after.to_string())
        }
        None => match target.title {
            Some(title) if !title.is_empty() => (format!("# {title}\n\n"), String::new()),
            _ => (String::new(), String::new()),
        },
    };

    let content = render_index(&before, lines, target.marker_start, target.marker_end, &after);
    if existing.is_some() {
        replace_atomically(path, &content)?;
    } else {
        fs::write(path, &content).map_err(|source| RetrieverError::FileWrite {
            path: path.clone(),
            source,
        })?;
    }
    Ok(path.clone())
}

/// Writes through a temporary file next to the real file, then renames it
/// into place, keeping the original permissions. A symlinked index keeps its
/// link; the target is what gets replaced.
fn replace_atomically(path: &Path, content: &str) -> Result<()> {
    let write_err = |source| RetrieverError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let real = fs::canonicalize(path).map_err(write_err)?;
    let dir = match real.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(&real).map_err(write_err)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    fs::set_permissions(tmp.path(), permissions).map_err(write_err)?;
    tmp.persist(&real).map_err(|e| write_err(e.error))?;
    Ok(())
}
