//! Tree string parser.
//!
//! Turns `tree`-style text into a [`TreeArena`]. Nesting is tracked with an
//! explicit stack of open entries keyed by prefix column, so arbitrarily deep
//! trees never recurse.

use std::sync::LazyLock;

use generational_arena::Index;
use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::entities::{NodeKind, TreeLine};
use crate::domain::error::{DomainError, DomainResult};
use crate::util::path::normalize_path_separator;

/// Default inline comment delimiter.
pub const DEFAULT_COMMENT_DELIMITER: char = '#';

/// Characters that may appear in the drawn part of a tree line.
pub const TREE_GLYPHS: &[char] = &[
    '│', '├', '└', '─', '┬', '┼', '┃', '┣', '┗', '━', '╰', '╭', '|', '`', '\'', '+', '-', '→',
];

/// Glyphs that open a branch and may be followed directly by connector dashes.
const BRANCH_GLYPHS: &[char] = &['├', '└', '│', '┣', '┗', '┃', '╰', '╭', '|', '`', '+'];

/// Longest run of glyphs and whitespace that ends in whitespace, or in a
/// branch connector glued to the name (`├──main.py`).
static PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let glyphs = char_class(TREE_GLYPHS);
    let branches = char_class(BRANCH_GLYPHS);
    Regex::new(&format!(r"^[\s{glyphs}]*(?:\s|[{branches}][─━\-]+)"))
        .expect("tree prefix pattern is valid")
});

/// Closing summary printed by `tree`, e.g. `2 directories, 5 files`.
static SUMMARY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+ director(y|ies)(, \d+ files?)?$").expect("tree summary pattern is valid")
});

const TAB_WIDTH: usize = 4;

/// A line that names an entry, before depth resolution.
#[derive(Debug)]
struct RawEntry {
    /// Width of the whole prefix
    column: usize,
    /// Width of the last drawn group (`└── `), None for plain indentation
    connector: Option<usize>,
    name: String,
    comment: Option<String>,
}

/// An entry still open for children while scanning.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Prefix column; None for the synthetic root without a `.` line
    column: Option<usize>,
    idx: Index,
    kind: NodeKind,
}

/// Parser for tree strings with a configurable comment delimiter.
#[derive(Debug, Clone)]
pub struct TreeParser {
    delimiter: char,
}

impl Default for TreeParser {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_DELIMITER)
    }
}

impl TreeParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Parse a tree string into an arena rooted at a synthetic directory.
    ///
    /// # Errors
    /// * [`DomainError::MalformedTree`] for depth jumps, entries nested under
    ///   a file, or names that cannot be used as relative paths.
    /// * [`DomainError::NameCollision`] for duplicate sibling names.
    #[instrument(level = "debug", skip(self, input))]
    pub fn parse(&self, input: &str) -> DomainResult<TreeArena> {
        self.scan(input).map(|(tree, _)| tree)
    }

    /// Parse and return the individual lines with their resolved depth.
    pub fn lines(&self, input: &str) -> DomainResult<Vec<TreeLine>> {
        self.scan(input).map(|(_, lines)| lines)
    }

    fn scan(&self, input: &str) -> DomainResult<(TreeArena, Vec<TreeLine>)> {
        let mut tree = TreeArena::new();
        let mut lines = Vec::new();
        let mut stack = vec![Frame {
            column: None,
            idx: tree.root(),
            kind: NodeKind::Directory,
        }];
        let mut unit: Option<usize> = None;

        for (i, raw) in input.lines().enumerate() {
            let line_no = i + 1;
            let Some(RawEntry {
                column,
                connector,
                name,
                comment,
            }) = self.split_line(raw)
            else {
                trace!(line_no, "skipping line without entry");
                continue;
            };

            // `tree` prints the starting directory as `.`; it stands for the root
            if lines.is_empty() && is_root_marker(&name) {
                debug!(line_no, column, "root marker");
                stack[0].column = Some(column);
                continue;
            }

            let name = normalize_path_separator(&name);
            let kind = NodeKind::of(&name);
            let bare = validate_name(&name, line_no)?;

            // Never pop the root frame
            while stack.len() > 1 && stack.last().is_some_and(|f| f.column >= Some(column)) {
                stack.pop();
            }
            let parent = stack[stack.len() - 1];

            if parent.kind == NodeKind::File {
                let parent_name = tree
                    .get_node(parent.idx)
                    .map(|n| n.name.clone())
                    .unwrap_or_default();
                return Err(DomainError::malformed(
                    line_no,
                    format!(
                        "'{name}' is nested under file '{parent_name}' (directories must end with '/')"
                    ),
                ));
            }

            if let Some(parent_column) = parent.column.filter(|&c| c < column) {
                let step = column - parent_column;
                // a drawn line is one connector group deeper than its parent
                let u = *unit.get_or_insert(connector.unwrap_or(step));
                if step >= 2 * u {
                    return Err(DomainError::malformed(
                        line_no,
                        format!(
                            "'{name}' is indented {step} columns past its parent, more than one level ({u} columns)"
                        ),
                    ));
                }
            }

            if collides(&tree, parent.idx, bare, kind) {
                let parent_name = tree
                    .get_node(parent.idx)
                    .map(|n| n.display_name())
                    .unwrap_or_default();
                return Err(DomainError::NameCollision {
                    line: line_no,
                    name: bare.to_string(),
                    parent: parent_name,
                });
            }

            let idx = tree.insert_node(parent.idx, bare.to_string(), kind, comment.clone(), line_no);
            let depth = tree.get_node(idx).map(|n| n.depth).unwrap_or_default();
            trace!(line_no, column, depth, name = %name, "entry");

            lines.push(TreeLine {
                line_no,
                column,
                depth,
                name,
                comment,
            });
            stack.push(Frame {
                column: Some(column),
                idx,
                kind,
            });
        }

        debug!(entries = tree.len(), "parsed tree");
        Ok((tree, lines))
    }

    /// Split a raw line into prefix widths, name and comment.
    ///
    /// Returns None for blank, glyph-only and comment-only lines.
    fn split_line(&self, raw: &str) -> Option<RawEntry> {
        if SUMMARY_REGEX.is_match(raw.trim()) {
            return None;
        }
        let prefix_len = PREFIX_REGEX
            .find(raw)
            .map(|m| m.end())
            .unwrap_or_else(|| raw.len() - raw.trim_start().len());
        let (prefix, rest) = raw.split_at(prefix_len);

        if rest.trim().chars().all(|c| TREE_GLYPHS.contains(&c)) {
            return None;
        }

        let (name, comment) = match self.find_delimiter(rest) {
            Some(0) => return None,
            Some(pos) => {
                let comment = rest[pos + self.delimiter.len_utf8()..].trim();
                (
                    &rest[..pos],
                    (!comment.is_empty()).then(|| comment.to_string()),
                )
            }
            None => (rest, None),
        };

        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(RawEntry {
            column: column_width(prefix),
            connector: connector_width(prefix),
            name: name.to_string(),
            comment,
        })
    }

    /// Position of the first delimiter that starts the text or follows whitespace.
    fn find_delimiter(&self, rest: &str) -> Option<usize> {
        rest.char_indices()
            .find(|&(pos, c)| {
                c == self.delimiter
                    && (pos == 0 || rest[..pos].ends_with(|p: char| p.is_whitespace()))
            })
            .map(|(pos, _)| pos)
    }
}

/// Parse with the default comment delimiter.
pub fn parse(input: &str) -> DomainResult<TreeArena> {
    TreeParser::default().parse(input)
}

fn column_width(prefix: &str) -> usize {
    prefix
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Width of the last drawn group of a prefix, e.g. 4 for `│   └── `.
fn connector_width(prefix: &str) -> Option<usize> {
    let drawn = prefix.trim_end();
    if drawn.is_empty() {
        return None;
    }
    let start = drawn
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(pos, c)| pos + c.len_utf8())
        .unwrap_or(0);
    Some(column_width(&prefix[start..]))
}

fn char_class(glyphs: &[char]) -> String {
    glyphs.iter().map(|c| regex::escape(&c.to_string())).collect()
}

/// True if `bare` cannot live next to the existing children of `parent`:
/// same name, or a path running through a sibling file (`a` and `a/b.txt`).
fn collides(tree: &TreeArena, parent: Index, bare: &str, kind: NodeKind) -> bool {
    let Some(parent) = tree.get_node(parent) else {
        return false;
    };
    parent
        .children
        .iter()
        .filter_map(|&idx| tree.get_node(idx))
        .any(|sibling| {
            sibling.name == bare
                || (sibling.kind == NodeKind::File && is_below(bare, &sibling.name))
                || (kind == NodeKind::File && is_below(&sibling.name, bare))
        })
}

/// `path` runs through `dir` as an intermediate component.
fn is_below(path: &str, dir: &str) -> bool {
    path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
}

fn is_root_marker(name: &str) -> bool {
    matches!(name, "." | "./")
}

/// Check that a declared name is a usable relative path; returns it without
/// the trailing `/`.
fn validate_name(name: &str, line_no: usize) -> DomainResult<&str> {
    let bare = name.strip_suffix('/').unwrap_or(name);
    if bare.is_empty() || bare.starts_with('/') {
        return Err(DomainError::malformed(
            line_no,
            format!("'{name}' is not a relative path"),
        ));
    }
    if let Some(bad) = bare
        .split('/')
        .find(|part| part.is_empty() || *part == "." || *part == "..")
    {
        return Err(DomainError::malformed(
            line_no,
            format!("'{name}' contains invalid path component '{bad}'"),
        ));
    }
    Ok(bare)
}
