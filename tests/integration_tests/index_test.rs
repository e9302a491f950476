// tests/integration_tests/index_test.rs
use super::common::{create_test_file, region, run_and_read, setup_notes_directory};
use anyhow::Result;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_generates_tree_with_default_excludes() -> Result<()> {
    let temp_dir = setup_notes_directory()?;

    let index = run_and_read(temp_dir.path(), &["--no-gitignore", "--title", "Notes"])?;

    assert!(index.starts_with("# Notes\n<!-- AUTO-TOC START -->\n"));
    assert_eq!(
        region(&index),
        vec![
            "- [README.md](README.md)",
            "- **guide/**",
            "  - [Advanced.md](guide/Advanced.md)",
            "  - [intro.md](guide/intro.md)",
            "  - **topics/deep/**",
            "    - [dive.md](guide/topics/deep/dive.md)",
        ]
    );
    Ok(())
}

#[test]
fn test_nested_example_layout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "a/b/c/readme.md", "")?;
    create_test_file(temp_dir.path(), "a/b/notes.md", "")?;

    let index = run_and_read(temp_dir.path(), &["--no-gitignore"])?;

    assert_eq!(
        region(&index),
        vec![
            "- **a/b/**",
            "  - [notes.md](a/b/notes.md)",
            "  - **c/**",
            "    - [readme.md](a/b/c/readme.md)",
        ]
    );
    Ok(())
}

#[test]
fn test_index_never_lists_itself() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "index.md", "# Index\n")?;
    create_test_file(temp_dir.path(), "page.md", "")?;

    let index = run_and_read(temp_dir.path(), &["--no-gitignore"])?;

    assert_eq!(region(&index), vec!["- [page.md](page.md)"]);
    Ok(())
}

#[test]
fn test_second_run_is_byte_identical() -> Result<()> {
    let temp_dir = setup_notes_directory()?;

    let first = run_and_read(temp_dir.path(), &["--no-gitignore", "--title", "T"])?;
    let second = run_and_read(temp_dir.path(), &["--no-gitignore", "--title", "T"])?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_hand_written_text_is_preserved() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "page.md", "")?;
    create_test_file(
        temp_dir.path(),
        "index.md",
        "# My notes\n\nRead these.\n<!-- AUTO-TOC START -->\nold\n<!-- AUTO-TOC END -->\nWritten by hand.\n",
    )?;

    let index = run_and_read(temp_dir.path(), &["--no-gitignore"])?;

    assert_eq!(
        index,
        "# My notes\n\nRead these.\n<!-- AUTO-TOC START -->\n- [page.md](page.md)\n<!-- AUTO-TOC END -->\nWritten by hand.\n"
    );
    Ok(())
}

#[test]
fn test_links_resolve_from_nested_output() -> Result<()> {
    let temp_dir = setup_notes_directory()?;
    fs::create_dir_all(temp_dir.path().join("docs"))?;

    let written = md_retriever::app::execute(&super::common::cli(
        temp_dir.path(),
        &["--no-gitignore", "--output", "docs/TOC.md"],
    ))?;
    let index = fs::read_to_string(&written)?;
    let output_dir = written.parent().expect("output has a parent");

    let links: Vec<String> = region(&index)
        .iter()
        .filter_map(|line| {
            let start = line.find("](")? + 2;
            Some(line[start..line.len() - 1].to_string())
        })
        .collect();

    assert_eq!(links.len(), 4);
    assert!(links.contains(&"../README.md".to_string()));
    for link in links {
        let target = output_dir.join(&link);
        assert!(target.is_file(), "{link} should resolve to a file");
        assert!(link.to_lowercase().ends_with(".md"));
    }
    Ok(())
}

#[test]
fn test_custom_markers() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "a.md", "")?;

    let index = run_and_read(
        temp_dir.path(),
        &["--no-gitignore", "--marker-start", "<!-- S -->", "--marker-end", "<!-- E -->"],
    )?;

    assert_eq!(index, "\n<!-- S -->\n- [a.md](a.md)\n<!-- E -->\n");
    Ok(())
}
