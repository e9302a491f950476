use crate::app::error::{Result, RetrieverError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::fs;
use std::path::{Path, PathBuf};

pub const IGNORE_FILENAME: &str = ".gitignore";

/// Outcome of looking for repository ignore files under the scan root.
#[derive(Debug)]
pub enum IgnoreFileRules {
    /// Ignore files are not honored for this run.
    Disabled,
    /// No ignore file, or none with usable rules, exists under the root.
    NotFound,
    /// Rules exist but could not be compiled into a matcher.
    Unavailable(String),
    Loaded(Gitignore),
}

impl IgnoreFileRules {
    pub fn into_matcher(self) -> Option<Gitignore> {
        match self {
            IgnoreFileRules::Loaded(gitignore) => Some(gitignore),
            _ => None,
        }
    }
}

/// Decides whether a directory or file under the scan root is excluded.
#[derive(Debug)]
pub struct IgnoreMatcher {
    globs: GlobSet,
    /// Prefixes of patterns ending in `/**`.
    subtree_prefixes: Vec<String>,
    gitignore: Option<Gitignore>,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String], gitignore: Option<Gitignore>) -> Result<Self> {
        Ok(Self {
            globs: build_globset(patterns)?,
            subtree_prefixes: patterns
                .iter()
                .filter_map(|p| p.strip_suffix("/**"))
                .map(|prefix| prefix.trim_end_matches('/').to_string())
                .collect(),
            gitignore,
        })
    }

    /// `relative_path` is root-relative with `/` separators.
    pub fn matches(&self, name: &str, relative_path: &str, is_dir: bool) -> bool {
        if let Some(gitignore) = &self.gitignore {
            if gitignore
                .matched_path_or_any_parents(relative_path, is_dir)
                .is_ignore()
            {
                return true;
            }
        }

        if self.globs.is_match(name) || self.globs.is_match(relative_path) {
            return true;
        }

        self.subtree_prefixes.iter().any(|prefix| {
            relative_path == prefix
                || relative_path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Shell-glob semantics: `*` also crosses `/`, like `fnmatch`.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(compile_glob(pat)?);
    }
    builder.build().map_err(|source| RetrieverError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Patterns globset cannot parse (an unclosed `[` or `{`) are matched as
/// literal text, as `fnmatch` does.
fn compile_glob(pat: &str) -> Result<Glob> {
    Glob::new(pat).or_else(|err| {
        log::warn!("Treating '{}' as literal text: {}", pat, err);
        Glob::new(&globset::escape(pat)).map_err(|source| RetrieverError::InvalidPattern {
            pattern: pat.to_string(),
            source,
        })
    })
}

/// Rewrites one ignore-file line so it keeps its meaning when every rule is
/// evaluated against the scan root. Returns `None` for blanks and comments.
pub fn normalize_ignore_line(line: &str, ignore_dir: &str) -> Option<String> {
    if line.is_empty() || line.trim_start().starts_with('#') {
        return None;
    }

    let (negation, raw) = match line.strip_prefix('!') {
        Some(rest) => ("!", rest),
        None => ("", line),
    };

    let normalized = if raw.starts_with('/') {
        format!("/{}", raw.trim_start_matches('/'))
    } else if ignore_dir.is_empty() {
        raw.to_string()
    } else {
        format!("{ignore_dir}/{raw}")
    };

    Some(format!("{negation}{normalized}"))
}

/// Collects the rules of every `.gitignore` under `root` into a single matcher.
pub fn load_ignore_files(root: &Path) -> IgnoreFileRules {
    let mut builder = GitignoreBuilder::new(root);
    let mut rule_count = 0usize;

    for ignore_file in find_ignore_files(root) {
        let content = match fs::read_to_string(&ignore_file) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Skipping unreadable {}: {}", ignore_file.display(), err);
                continue;
            }
        };

        let ignore_dir = ignore_file
            .parent()
            .and_then(|dir| diff_paths(dir, root))
            .map(|dir| to_slash(&dir))
            .unwrap_or_default();

        for line in content.lines() {
            let Some(pattern) = normalize_ignore_line(line, &ignore_dir) else {
                continue;
            };
            match builder.add_line(Some(ignore_file.clone()), &pattern) {
                Ok(_) => rule_count += 1,
                Err(err) => log::warn!(
                    "Ignoring invalid rule '{}' in {}: {}",
                    line,
                    ignore_file.display(),
                    err
                ),
            }
        }
    }

    if rule_count == 0 {
        return IgnoreFileRules::NotFound;
    }

    match builder.build() {
        Ok(gitignore) => {
            log::debug!("Loaded {} ignore-file rules", rule_count);
            IgnoreFileRules::Loaded(gitignore)
        }
        Err(err) => IgnoreFileRules::Unavailable(err.to_string()),
    }
}

/// Every ignore file under `root`, parents before children so that deeper
/// rules are added later and win.
fn find_ignore_files(root: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut found = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                let is_file = entry.file_type().is_some_and(|t| t.is_file());
                if is_file && entry.file_name() == IGNORE_FILENAME {
                    found.push(entry.into_path());
                }
            }
            Err(err) => log::warn!("Error walking entry: {}", err),
        }
    }
    // Names like `-team` sort before `.gitignore`; the walk alone would visit them first.
    found.sort_by_key(|path| path.components().count());
    found
}

/// Root-relative path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
