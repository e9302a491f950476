use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "md-retriever",
    author,
    version,
    about = "Write a tree of links to every Markdown file under a directory into an index file",
    long_about = "Recursively lists the .md files under ROOT and rewrites the marked region of the \
                  index file with a nested link tree.\nPrecedence: CLI > TOML > built-in defaults."
)]
pub struct Cli {
    /// Directory to scan
    pub root: PathBuf,

    /// TOML config file (defaults to ROOT/.md-retriever/config.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Glob pattern for files or directories to exclude (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Index file name, relative to ROOT (default: index.md)
    #[arg(long)]
    pub output: Option<String>,

    /// Line marking the start of the generated region
    #[arg(long)]
    pub marker_start: Option<String>,

    /// Line marking the end of the generated region
    #[arg(long)]
    pub marker_end: Option<String>,

    /// H1 title written when the index file is created
    #[arg(long)]
    pub title: Option<String>,

    /// Disable the built-in exclude list
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Honor .gitignore files (default)
    #[arg(long, overrides_with = "no_gitignore")]
    pub respect_gitignore: bool,

    /// Do not honor .gitignore files (scan everything)
    #[arg(long, overrides_with = "respect_gitignore")]
    pub no_gitignore: bool,
}

impl Cli {
    /// `None` when neither gitignore flag was given, deferring to the config file.
    pub fn gitignore_override(&self) -> Option<bool> {
        match (self.respect_gitignore, self.no_gitignore) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
