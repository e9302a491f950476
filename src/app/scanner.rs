use crate::app::error::Result;
use crate::app::matcher::{to_slash, IgnoreMatcher};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Scanner {
    root: PathBuf,
    matcher: Arc<IgnoreMatcher>,
}

impl Scanner {
    pub fn new(root: PathBuf, matcher: IgnoreMatcher) -> Self {
        Self {
            root,
            matcher: Arc::new(matcher),
        }
    }

    /// Root-relative paths (with `/` separators) of every included Markdown
    /// file, sorted case-insensitively.
    pub fn scan(&self) -> Result<Vec<String>> {
        let root = self.root.clone();
        let matcher = Arc::clone(&self.matcher);

        // Only our own rules apply; excluded directories are never entered.
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .filter_entry(move |entry| !is_excluded(&root, &matcher, entry))
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = result?;
            if let Some(relative) = self.process_entry(&entry) {
                entries.push(relative);
            }
        }

        entries.sort_by_key(|p| (p.to_lowercase(), p.clone()));
        log::info!("Found {} Markdown files under {}", entries.len(), self.root.display());
        Ok(entries)
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<String> {
        if entry.depth() == 0 || entry.file_type().map_or(true, |t| t.is_dir()) {
            return None;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_markdown(&name) {
            return None;
        }

        let relative = diff_paths(entry.path(), &self.root)?;
        Some(to_slash(&relative))
    }
}

fn is_excluded(root: &Path, matcher: &IgnoreMatcher, entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let Some(relative) = diff_paths(entry.path(), root) else {
        return false;
    };

    let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
    let name = entry.file_name().to_string_lossy();
    let excluded = matcher.matches(&name, &to_slash(&relative), is_dir);
    if excluded {
        log::debug!("Excluding {}", relative.display());
    }
    excluded
}

pub fn is_markdown(name: &str) -> bool {
    name.to_lowercase().ends_with(".md")
}

/// Drops the index file itself from the scan result.
pub fn without_output(paths: Vec<String>, output_relative: &str) -> Vec<String> {
    paths.into_iter().filter(|p| p != output_relative).collect()
}
