use pathdiff::diff_paths;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const INDENT: &str = "  ";

/// A directory holding included Markdown files, directly or below.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirNode {
    pub files: Vec<String>,
    pub dirs: BTreeMap<String, DirNode>,
}

impl DirNode {
    /// Builds the tree from root-relative paths with `/` separators.
    pub fn from_paths<S: AsRef<str>>(paths: &[S]) -> Self {
        let mut root = DirNode::default();
        for path in paths {
            let mut parts: Vec<&str> = path.as_ref().split('/').collect();
            let Some(file) = parts.pop() else { continue };

            let node = parts.into_iter().fold(&mut root, |node, part| {
                node.dirs.entry(part.to_string()).or_default()
            });
            node.files.push(file.to_string());
        }
        root
    }

    /// Follows directories that have no files and exactly one subdirectory.
    /// Returns the collapsed names and the node where the chain stops.
    fn flatten_chain<'a>(&'a self, name: &'a str) -> (Vec<&'a str>, &'a DirNode) {
        let mut chain = vec![name];
        let mut node = self;
        while node.files.is_empty() && node.dirs.len() == 1 {
            let Some((child_name, child)) = node.dirs.iter().next() else {
                break;
            };
            chain.push(child_name);
            node = child;
        }
        (chain, node)
    }
}

pub struct OutputGenerator {
    root: PathBuf,
    output_dir: PathBuf,
}

impl OutputGenerator {
    pub fn new(root: &Path, output_dir: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Renders the Markdown bullet list for the given sorted paths.
    pub fn generate_tree<S: AsRef<str>>(&self, paths: &[S]) -> Vec<String> {
        let tree = DirNode::from_paths(paths);
        self.render(&tree, "")
    }

    fn render(&self, node: &DirNode, prefix: &str) -> Vec<String> {
        let mut lines = Vec::new();

        let mut files: Vec<&String> = node.files.iter().collect();
        files.sort_by_key(|f| f.to_lowercase());
        for file in files {
            let href = self.link_to(&join(prefix, file));
            lines.push(format!("- [{file}]({href})"));
        }

        let mut dirs: Vec<(&String, &DirNode)> = node.dirs.iter().collect();
        dirs.sort_by_key(|(name, _)| name.to_lowercase());
        for (name, child) in dirs {
            let (chain, last) = child.flatten_chain(name);
            let display = chain.join("/");
            lines.push(format!("- **{display}/**"));

            let child_prefix = join(prefix, &display);
            lines.extend(
                self.render(last, &child_prefix)
                    .into_iter()
                    .map(|line| format!("{INDENT}{line}")),
            );
        }

        lines
    }

    /// Link to a root-relative file, relative to the output directory.
    fn link_to(&self, relative: &str) -> String {
        let target = self.root.join(relative);
        let href = diff_paths(&target, &self.output_dir).unwrap_or(target);
        href.to_string_lossy().replace('\\', "/")
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
