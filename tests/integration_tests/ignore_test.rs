// tests/integration_tests/ignore_test.rs
use super::common::{create_test_file, region, run_and_read};
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_excluded_directory_contributes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "archive/2020/jan/old.md", "")?;
    create_test_file(temp_dir.path(), "archive/readme.md", "")?;
    create_test_file(temp_dir.path(), "current.md", "")?;

    let index = run_and_read(temp_dir.path(), &["--no-gitignore", "--exclude", "archive"])?;

    assert_eq!(region(&index), vec!["- [current.md](current.md)"]);
    Ok(())
}

#[test]
fn test_gitignore_rules_are_honored_by_default() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    create_test_file(root, ".gitignore", "# local files\nscratch/\n/private.md\n")?;
    create_test_file(root, "docs/.gitignore", "*.draft.md\n!keep.draft.md\n")?;
    create_test_file(root, "scratch/idea.md", "")?;
    create_test_file(root, "private.md", "")?;
    create_test_file(root, "docs/private.md", "")?;
    create_test_file(root, "docs/post.draft.md", "")?;
    create_test_file(root, "docs/keep.draft.md", "")?;
    create_test_file(root, "post.draft.md", "")?;

    let index = run_and_read(root, &[])?;

    assert_eq!(
        region(&index),
        vec![
            "- [post.draft.md](post.draft.md)",
            "- **docs/**",
            "  - [keep.draft.md](docs/keep.draft.md)",
            "  - [private.md](docs/private.md)",
        ]
    );
    Ok(())
}

#[test]
fn test_no_gitignore_scans_everything() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), ".gitignore", "scratch/\n")?;
    create_test_file(temp_dir.path(), "scratch/idea.md", "")?;

    let index = run_and_read(temp_dir.path(), &["--no-gitignore"])?;

    assert_eq!(
        region(&index),
        vec!["- **scratch/**", "  - [idea.md](scratch/idea.md)"]
    );
    Ok(())
}

#[test]
fn test_subtree_pattern_excludes_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "site/generated/page.md", "")?;
    create_test_file(temp_dir.path(), "site/about.md", "")?;

    let index = run_and_read(
        temp_dir.path(),
        &["--no-gitignore", "--exclude", "site/generated/**"],
    )?;

    assert_eq!(
        region(&index),
        vec!["- **site/**", "  - [about.md](site/about.md)"]
    );
    Ok(())
}
