use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::{DictValue, NodeKind, TreeDict};

/// Name of the synthetic root node standing in for `where_to_create`.
pub const ROOT_NAME: &str = ".";

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Entry name without the trailing `/`
    pub name: String,
    pub kind: NodeKind,
    /// Inline comment from the tree string
    pub comment: Option<String>,
    /// Nesting level, 0 for the synthetic root
    pub depth: usize,
    /// 1-based input line, 0 for the synthetic root
    pub line_no: usize,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in input order
    pub children: Vec<Index>,
}

impl TreeNode {
    /// Name as declared in the tree string (directories end with `/`).
    pub fn display_name(&self) -> String {
        match self.kind {
            NodeKind::Directory if self.name != ROOT_NAME => format!("{}/", self.name),
            _ => self.name.clone(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())?;
        if let Some(comment) = &self.comment {
            write!(f, "  # {}", comment)?;
        }
        Ok(())
    }
}

/// Arena-based tree of parsed entries.
///
/// Always holds a synthetic root directory; entries of the tree string hang
/// below it in input order. Structural equality ignores arena indices.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Index,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            name: ROOT_NAME.to_string(),
            kind: NodeKind::Directory,
            comment: None,
            depth: 0,
            line_no: 0,
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Attach a new node below `parent`; depth is derived from the parent.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(
        &mut self,
        parent: Index,
        name: String,
        kind: NodeKind,
        comment: Option<String>,
        line_no: usize,
    ) -> Index {
        let depth = self.arena.get(parent).map(|p| p.depth + 1).unwrap_or(1);
        let node_idx = self.arena.insert(TreeNode {
            name,
            kind,
            comment,
            depth,
            line_no,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Child of `parent` with the given name, regardless of kind.
    pub fn find_child(&self, parent: Index, name: &str) -> Option<Index> {
        self.get_node(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.get_node(child).is_some_and(|c| c.name == name))
    }

    /// Number of entries, excluding the synthetic root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-level entries (children of the synthetic root).
    pub fn top_level(&self) -> impl Iterator<Item = &TreeNode> {
        self.arena[self.root]
            .children
            .iter()
            .filter_map(|&idx| self.get_node(idx))
    }

    /// Pre-order walk over all entries with their path relative to the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Relative paths of all entries in creation order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.iter().map(|(path, _)| path).collect()
    }

    /// Length of the longest root-to-leaf chain, not counting the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter()
            .map(|(_, node)| node.depth)
            .max()
            .unwrap_or(0)
    }

    /// Project the tree into a plain ordered mapping.
    ///
    /// Directories map to nested dicts keyed by their declared name
    /// (trailing `/` kept); files map to `None`, or to their comment when
    /// `include_comments` is set.
    #[instrument(level = "debug", skip(self))]
    pub fn to_dict(&self, include_comments: bool) -> TreeDict {
        let mut built: HashMap<Index, TreeDict> = HashMap::new();

        for (idx, node) in self.iter_postorder() {
            if !node.is_dir() {
                continue;
            }
            let mut dict = TreeDict::new();
            for &child_idx in &node.children {
                let Some(child) = self.get_node(child_idx) else {
                    continue;
                };
                let value = match child.kind {
                    NodeKind::Directory => {
                        DictValue::Dir(built.remove(&child_idx).unwrap_or_default())
                    }
                    NodeKind::File if include_comments => DictValue::File(child.comment.clone()),
                    NodeKind::File => DictValue::File(None),
                };
                dict.insert(child.display_name(), value);
            }
            built.insert(idx, dict);
        }

        built.remove(&self.root).unwrap_or_default()
    }

    /// Render as a `termtree` for display.
    ///
    /// Built bottom-up from the post-order walk, like [`Self::to_dict`].
    pub fn to_termtree(&self, include_comments: bool) -> Tree<String> {
        let mut built: HashMap<Index, Tree<String>> = HashMap::new();

        for (idx, node) in self.iter_postorder() {
            let label = if include_comments {
                node.to_string()
            } else {
                node.display_name()
            };
            let leaves = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect::<Vec<_>>();
            built.insert(idx, Tree::new(label).with_leaves(leaves));
        }

        built
            .remove(&self.root)
            .unwrap_or_else(|| Tree::new(ROOT_NAME.to_string()))
    }

    /// Structural comparison of two trees: names, kinds, comments and order.
    pub fn structurally_eq(&self, other: &TreeArena) -> bool {
        let ours = self.iter().map(|(p, n)| (p, &n.kind, &n.comment));
        let theirs = other.iter().map(|(p, n)| (p, &n.kind, &n.comment));
        ours.eq(theirs)
    }
}

impl PartialEq for TreeArena {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

/// Pre-order iterator yielding `(relative_path, node)`; skips the root.
pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, PathBuf)>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.get_node(arena.root()) {
            for &child in root.children.iter().rev() {
                stack.push((child, PathBuf::new()));
            }
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (PathBuf, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, parent_path)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                let path = parent_path.join(&node.name);
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, path.clone()));
                }
                return Some((path, node));
            }
        }
        None
    }
}

/// Post-order iterator; children come before their parent, root last.
pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        Self {
            arena,
            stack: vec![(arena.root(), false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
