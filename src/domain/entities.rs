//! Domain entities: parsed lines and the plain dict projection

use std::fmt;

/// Whether an entry denotes a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    /// Decide the kind of a declared name.
    ///
    /// A trailing `/` is the only signal; nothing is looked up on disk.
    pub fn of(name: &str) -> Self {
        if name.ends_with('/') {
            NodeKind::Directory
        } else {
            NodeKind::File
        }
    }

    pub fn is_dir(self) -> bool {
        self == NodeKind::Directory
    }
}

/// One non-blank line of tree input after prefix and comment stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// 1-based line number in the input
    pub line_no: usize,
    /// Character width of the glyph/whitespace prefix
    pub column: usize,
    /// Nesting level; top-level entries are 1, the synthetic root is 0
    pub depth: usize,
    /// Declared name, trailing `/` kept for directories
    pub name: String,
    /// Inline comment following the delimiter
    pub comment: Option<String>,
}

impl TreeLine {
    pub fn kind(&self) -> NodeKind {
        NodeKind::of(&self.name)
    }
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", "  ".repeat(self.depth.saturating_sub(1)), self.name)?;
        if let Some(comment) = &self.comment {
            write!(f, " # {}", comment)?;
        }
        Ok(())
    }
}

/// Value of a [`TreeDict`] entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictValue {
    Dir(TreeDict),
    /// File leaf; carries the comment only when comments were requested
    File(Option<String>),
}

impl DictValue {
    pub fn as_dir(&self) -> Option<&TreeDict> {
        match self {
            DictValue::Dir(dict) => Some(dict),
            DictValue::File(_) => None,
        }
    }
}

/// Ordered name → value mapping; keeps input order of siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDict {
    entries: Vec<(String, DictValue)>,
}

impl TreeDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: DictValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&DictValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for TreeDict {
    /// Literal style rendering with quoted keys, e.g. `{"src/": {"app.py": None}}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: ", key)?;
            match value {
                DictValue::Dir(dict) => write!(f, "{}", dict)?,
                DictValue::File(Some(comment)) => write!(f, "{:?}", comment)?,
                DictValue::File(None) => write!(f, "None")?,
            }
        }
        write!(f, "}}")
    }
}
