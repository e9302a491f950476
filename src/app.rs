// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod matcher;
pub mod models;
pub mod scanner;
pub mod writer;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Component, Path, PathBuf};

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::matcher::{load_ignore_files, to_slash, IgnoreFileRules, IgnoreMatcher};
use self::models::Config;
use self::scanner::{without_output, Scanner};
use self::writer::{write_index, IndexTarget};

/// Parses the command line, regenerates the index and reports where it went.
pub fn run() -> Result<()> {
    let args = Cli::parse();
    let written = execute(&args)?;
    println!("wrote: {}", written.display());
    Ok(())
}

/// Runs the whole pipeline for already-parsed arguments.
pub fn execute(args: &Cli) -> Result<PathBuf> {
    let config = resolve_config(args).context("Failed to resolve configuration")?;

    let root = std::path::absolute(&args.root)
        .map(|root| lexically_normal(&root))
        .with_context(|| format!("Failed to resolve root {}", args.root.display()))?;

    generate_index(&root, &config)
}

/// Scans `root` and rewrites the index described by `config`.
pub fn generate_index(root: &Path, config: &Config) -> Result<PathBuf> {
    let root = &lexically_normal(root);
    // Absolute outputs stay as they are.
    let output_path = lexically_normal(&root.join(&config.output));
    let output_dir = output_path.parent().unwrap_or(root).to_path_buf();

    let gitignore = ignore_rules(root, config.respect_gitignore);
    let matcher = IgnoreMatcher::new(&config.excludes, gitignore)?;

    let scanner = Scanner::new(root.to_path_buf(), matcher);
    let files = scanner
        .scan()
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let output_relative = pathdiff::diff_paths(&output_path, root)
        .map(|p| to_slash(&p))
        .unwrap_or_default();
    let files = without_output(files, &output_relative);

    let lines = OutputGenerator::new(root, &output_dir).generate_tree(&files);

    let target = IndexTarget {
        path: output_path,
        marker_start: &config.marker_start,
        marker_end: &config.marker_end,
        title: config.title.as_deref(),
    };
    let written = write_index(&target, &lines)
        .with_context(|| format!("Failed to write index {}", target.path.display()))?;

    Ok(written)
}

fn ignore_rules(root: &Path, respect_gitignore: bool) -> Option<ignore::gitignore::Gitignore> {
    let rules = if respect_gitignore {
        load_ignore_files(root)
    } else {
        IgnoreFileRules::Disabled
    };

    match rules {
        IgnoreFileRules::Unavailable(reason) => {
            log::warn!(
                ".gitignore is enabled but its rules could not be loaded ({}); falling back to exclude patterns only",
                reason
            );
            None
        }
        IgnoreFileRules::NotFound => {
            log::debug!("No .gitignore rules found under {}", root.display());
            None
        }
        rules => rules.into_matcher(),
    }
}

/// Drops `.` and resolves `..` without touching the filesystem, so that
/// `diff_paths` can relate the root and the output path.
fn lexically_normal(path: &Path) -> PathBuf {
    let mut normal = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normal.components().next_back() {
                Some(Component::Normal(_)) => {
                    normal.pop();
                }
                // `..` above the filesystem root is the root itself.
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normal.push(component),
            },
            other => normal.push(other),
        }
    }
    normal
}
