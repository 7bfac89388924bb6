//! Comment markers per file type
//!
//! Maps a file's extension (or well-known file name) to the syntax used to
//! write a one-line comment into it. The built-in table is a read-only
//! static; configuration layers build an owned copy with overrides.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

/// How a single-line comment is written in a given language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
    pub prefix: String,
    /// Closing token for block-only languages (`-->`, `*/`)
    pub suffix: Option<String>,
}

impl CommentStyle {
    pub fn line(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: None,
        }
    }

    pub fn block(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: Some(suffix.to_string()),
        }
    }

    /// Comment line including the trailing newline.
    pub fn render(&self, comment: &str) -> String {
        match &self.suffix {
            Some(suffix) => format!("{} {} {}\n", self.prefix, comment, suffix),
            None => format!("{} {}\n", self.prefix, comment),
        }
    }
}

const HASH: &[&str] = &[
    "py", "pyi", "sh", "bash", "zsh", "fish", "rb", "pl", "pm", "r", "yaml", "yml", "toml", "cfg",
    "conf", "cmake", "nim", "ex", "exs", "jl", "ps1", "tf", "dockerfile", "mk", "gitignore", "env",
];
const SLASH: &[&str] = &[
    "js", "mjs", "cjs", "ts", "tsx", "jsx", "java", "c", "h", "cc", "cpp", "cxx", "hpp", "cs",
    "go", "rs", "swift", "kt", "kts", "scala", "dart", "php", "groovy", "zig", "proto", "jsonc",
    "scss", "less", "sol", "v",
];
const DASH: &[&str] = &["sql", "lua", "hs", "elm", "ada"];
const SEMICOLON: &[&str] = &["ini", "clj", "cljs", "lisp", "el", "scm", "asm"];
const PERCENT: &[&str] = &["tex", "sty", "erl", "hrl", "m"];
const HTML: &[&str] = &["html", "htm", "xml", "md", "svg", "vue", "xhtml"];

/// File names without a telling extension.
const HASH_NAMES: &[&str] = &[
    "Dockerfile",
    "Makefile",
    "Rakefile",
    "Gemfile",
    "Procfile",
    "Vagrantfile",
    "CMakeLists.txt",
    ".gitignore",
    ".dockerignore",
    ".env",
];

static BUILTIN: LazyLock<CommentMarkers> = LazyLock::new(|| {
    let mut by_extension = HashMap::new();
    let groups: [(&[&str], CommentStyle); 6] = [
        (HASH, CommentStyle::line("#")),
        (SLASH, CommentStyle::line("//")),
        (DASH, CommentStyle::line("--")),
        (SEMICOLON, CommentStyle::line(";")),
        (PERCENT, CommentStyle::line("%")),
        (HTML, CommentStyle::block("<!--", "-->")),
    ];
    for (extensions, style) in groups {
        for ext in extensions {
            by_extension.insert(ext.to_string(), style.clone());
        }
    }
    by_extension.insert("css".into(), CommentStyle::block("/*", "*/"));
    by_extension.insert("vim".into(), CommentStyle::line("\""));
    by_extension.insert("bat".into(), CommentStyle::line("REM"));
    by_extension.insert("cmd".into(), CommentStyle::line("REM"));

    let by_name = HASH_NAMES
        .iter()
        .map(|name| (name.to_string(), CommentStyle::line("#")))
        .collect();

    CommentMarkers {
        by_extension,
        by_name,
    }
});

/// Lookup table from file to [`CommentStyle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMarkers {
    /// Lower-case extension without the dot
    by_extension: HashMap<String, CommentStyle>,
    /// Exact file names
    by_name: HashMap<String, CommentStyle>,
}

impl Default for CommentMarkers {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl CommentMarkers {
    /// The shared built-in table.
    pub fn builtin() -> &'static CommentMarkers {
        &BUILTIN
    }

    /// Built-in table plus overrides keyed by extension (`"py"` or `".py"`).
    ///
    /// The value is the line comment prefix; an empty value disables comments
    /// for that extension.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut markers = Self::builtin().clone();
        for (ext, prefix) in overrides {
            let ext = ext.trim_start_matches('.').to_lowercase();
            if prefix.trim().is_empty() {
                markers.by_extension.remove(&ext);
            } else {
                markers
                    .by_extension
                    .insert(ext, CommentStyle::line(prefix.trim()));
            }
        }
        markers
    }

    /// Style for a path: exact file name first, then extension.
    pub fn for_path(&self, path: &Path) -> Option<&CommentStyle> {
        let file_name = path.file_name()?.to_str()?;
        if let Some(style) = self.by_name.get(file_name) {
            return Some(style);
        }
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.by_extension.get(&ext)
    }

    /// Comment line for `path`, or None when the file type is unknown.
    pub fn render(&self, path: &Path, comment: &str) -> Option<String> {
        self.for_path(path).map(|style| style.render(comment))
    }
}
