pub const DEFAULT_OUTPUT: &str = "index.md";
pub const DEFAULT_MARKER_START: &str = "<!-- AUTO-TOC START -->";
pub const DEFAULT_MARKER_END: &str = "<!-- AUTO-TOC END -->";

/// Excluded unless `no_default_excludes` is set.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".DS_Store",
    "node_modules",
    ".venv",
    "dist",
    "build",
    "Library",
    "Temp",
    ".Trash",
    ".idea",
    ".vscode",
];

/// Represents the final configuration after merging defaults, the TOML file and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Index file, relative to the scan root unless absolute.
    pub output: String,
    pub marker_start: String,
    pub marker_end: String,
    /// H1 heading used only when the index file is created.
    pub title: Option<String>,
    pub no_default_excludes: bool,
    pub excludes: Vec<String>,
    pub respect_gitignore: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            marker_start: DEFAULT_MARKER_START.to_string(),
            marker_end: DEFAULT_MARKER_END.to_string(),
            title: None,
            no_default_excludes: false,
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            respect_gitignore: true,
        }
    }
}
