//! Tests for tree string parsing

use std::path::PathBuf;

use rstest::rstest;

use creatree::domain::{NodeKind, TreeParser};
use creatree::util::testing;
use creatree::{parse, DomainError};

const EXAMPLE: &str = "
example_project/
├── main.py # entry point
├── src/
│   └── app.py
└── empty_directory/
";

fn paths(input: &str) -> Vec<PathBuf> {
    parse(input).expect("parse tree").paths()
}

// ============================================================
// Structure
// ============================================================

#[test]
fn given_example_tree_when_parsing_then_builds_hierarchy() {
    testing::init_test_setup();

    // Act
    let tree = parse(EXAMPLE).unwrap();

    // Assert
    assert_eq!(
        tree.paths(),
        vec![
            PathBuf::from("example_project"),
            PathBuf::from("example_project/main.py"),
            PathBuf::from("example_project/src"),
            PathBuf::from("example_project/src/app.py"),
            PathBuf::from("example_project/empty_directory"),
        ]
    );
    let kinds: Vec<_> = tree.iter().map(|(_, n)| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Directory,
            NodeKind::File,
            NodeKind::Directory,
            NodeKind::File,
            NodeKind::Directory,
        ]
    );
    let main = tree.iter().find(|(_, n)| n.name == "main.py").unwrap().1;
    assert_eq!(main.comment.as_deref(), Some("entry point"));
    assert_eq!(main.depth, 2);
}

#[test]
fn given_same_input_when_parsing_twice_then_structurally_equal() {
    let first = parse(EXAMPLE).unwrap();
    let second = parse(EXAMPLE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn given_different_comment_when_comparing_then_not_equal() {
    let first = parse("a.py # one\n").unwrap();
    let second = parse("a.py # two\n").unwrap();
    assert_ne!(first, second);
}

#[rstest]
#[case::unicode(
    "project/\n├── a.py\n├── lib/\n│   ├── b.py\n│   └── c/\n│       └── d.py\n└── e.py\n"
)]
#[case::ascii(
    "project/\n|-- a.py\n|-- lib/\n|   |-- b.py\n|   `-- c/\n|       `-- d.py\n`-- e.py\n"
)]
#[case::short_connectors(
    "project/\n├─ a.py\n├─ lib/\n│   ├─ b.py\n│   └─ c/\n│       └─ d.py\n└─ e.py\n"
)]
#[case::bar_dashes(
    "    project/\n    │── a.py\n    │── lib/\n    │   │── b.py\n    │   │── c/\n    │   │   │── d.py\n    │── e.py\n"
)]
#[case::indentation_only("project/\n  a.py\n  lib/\n    b.py\n    c/\n      d.py\n  e.py\n")]
#[case::tabs("project/\n\ta.py\n\tlib/\n\t\tb.py\n\t\tc/\n\t\t\td.py\n\te.py\n")]
fn given_drawing_style_when_parsing_then_same_structure(#[case] input: &str) {
    assert_eq!(
        paths(input),
        vec![
            PathBuf::from("project"),
            PathBuf::from("project/a.py"),
            PathBuf::from("project/lib"),
            PathBuf::from("project/lib/b.py"),
            PathBuf::from("project/lib/c"),
            PathBuf::from("project/lib/c/d.py"),
            PathBuf::from("project/e.py"),
        ]
    );
}

#[test]
fn given_tree_command_output_when_parsing_then_root_and_summary_ignored() {
    let input = ".\n├── Cargo.toml\n└── src/\n    └── lib.rs\n\n1 directory, 2 files\n";

    let tree = parse(input).unwrap();

    assert_eq!(
        tree.paths(),
        vec![
            PathBuf::from("Cargo.toml"),
            PathBuf::from("src"),
            PathBuf::from("src/lib.rs"),
        ]
    );
}

#[test]
fn given_several_top_level_entries_when_parsing_then_all_are_roots() {
    let input = "root1/\n├── a/\n│   ├── b.py\n│   └── c.py\n├── d/\n└── e.py\nroot2/\n├── f/\n└── g.py\n";

    let tree = parse(input).unwrap();

    let roots: Vec<_> = tree.top_level().map(|n| n.display_name()).collect();
    assert_eq!(roots, vec!["root1/", "root2/"]);
    assert_eq!(tree.len(), 9);
}

#[test]
fn given_blank_and_glyph_only_lines_when_parsing_then_skipped() {
    let input = "\n\nproject/\n│\n├── a.py\n│\n\n└── b.py\n\n";
    assert_eq!(
        paths(input),
        vec![
            PathBuf::from("project"),
            PathBuf::from("project/a.py"),
            PathBuf::from("project/b.py"),
        ]
    );
}

#[test]
fn given_dedent_to_middle_level_when_parsing_then_attaches_to_open_ancestor() {
    let input = "a/\n    b/\n        c.txt\n    d.txt\ne.txt\n";
    assert_eq!(
        paths(input),
        vec![
            PathBuf::from("a"),
            PathBuf::from("a/b"),
            PathBuf::from("a/b/c.txt"),
            PathBuf::from("a/d.txt"),
            PathBuf::from("e.txt"),
        ]
    );
}

#[test]
fn given_windows_separators_when_parsing_then_normalized() {
    let tree = parse("project\\\n└── src\\main.rs\n").unwrap();
    assert_eq!(
        tree.paths(),
        vec![PathBuf::from("project"), PathBuf::from("project/src/main.rs")]
    );
    assert!(tree.top_level().all(|n| n.kind == NodeKind::Directory));
}

#[test]
fn given_entries_glued_to_connectors_when_parsing_then_glyphs_stripped() {
    let input = "root/\n├──main.py\n└──lib/\n   └──mod.rs\n";
    assert_eq!(
        paths(input),
        vec![
            PathBuf::from("root"),
            PathBuf::from("root/main.py"),
            PathBuf::from("root/lib"),
            PathBuf::from("root/lib/mod.rs"),
        ]
    );
}

// ============================================================
// Directory vs file
// ============================================================

#[rstest]
#[case("data/", NodeKind::Directory)]
#[case("data", NodeKind::File)]
#[case("archive.tar.gz", NodeKind::File)]
#[case("no_extension_dir_like", NodeKind::File)]
#[case(".config/", NodeKind::Directory)]
fn given_name_when_parsing_then_trailing_slash_decides_kind(
    #[case] name: &str,
    #[case] kind: NodeKind,
) {
    let tree = parse(name).unwrap();
    let node = tree.top_level().next().unwrap();
    assert_eq!(node.kind, kind);
}

// ============================================================
// Errors
// ============================================================

#[test]
fn given_two_level_jump_when_parsing_then_malformed() {
    let input = "project/\n├── a/\n│   │   └── too_deep.py\n";

    let err = parse(input).unwrap_err();

    assert!(
        matches!(err, DomainError::MalformedTree { line: 3, .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn given_jump_on_first_line_below_root_when_parsing_then_malformed() {
    let err = parse("root/\n│   │   └── deep.txt\n").unwrap_err();
    assert!(
        matches!(err, DomainError::MalformedTree { line: 2, .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn given_indentation_jump_when_parsing_then_malformed() {
    let err = parse("a/\n  b/\n      c.txt\n").unwrap_err();
    assert!(matches!(err, DomainError::MalformedTree { line: 3, .. }));
}

#[test]
fn given_entry_under_file_when_parsing_then_malformed() {
    // `src` lacks the trailing slash, so it is a file and cannot have children
    let input = "project/\n├── src\n│   └── app.py\n";

    let err = parse(input).unwrap_err();

    match err {
        DomainError::MalformedTree { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("src"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_duplicate_siblings_when_parsing_then_name_collision() {
    let input = "project/\n├── a.py\n└── a.py\n";

    let err = parse(input).unwrap_err();

    assert_eq!(
        err,
        DomainError::NameCollision {
            line: 3,
            name: "a.py".to_string(),
            parent: "project/".to_string(),
        }
    );
}

#[test]
fn given_file_and_directory_with_same_name_when_parsing_then_name_collision() {
    let err = parse("a\na/\n").unwrap_err();
    assert!(matches!(err, DomainError::NameCollision { line: 2, .. }));
}

#[test]
fn given_path_through_sibling_file_when_parsing_then_name_collision() {
    let err = parse("a\na/b.txt\n").unwrap_err();
    assert!(matches!(err, DomainError::NameCollision { line: 2, .. }));
}

#[test]
fn given_same_name_in_different_directories_when_parsing_then_ok() {
    let tree = parse("a/\n    mod.rs\nb/\n    mod.rs\n").unwrap();
    assert_eq!(tree.len(), 4);
}

#[test]
fn given_parent_escape_when_parsing_then_malformed() {
    let err = parse("project/\n└── ../evil.sh\n").unwrap_err();
    assert!(matches!(err, DomainError::MalformedTree { line: 2, .. }));
}

// ============================================================
// Comments
// ============================================================

#[test]
fn given_custom_delimiter_when_parsing_then_hash_stays_in_name() {
    let parser = TreeParser::new(';');

    let tree = parser.parse("notes/\n└── #todo.md ; scratch\n").unwrap();

    let node = tree.iter().nth(1).unwrap().1;
    assert_eq!(node.name, "#todo.md");
    assert_eq!(node.comment.as_deref(), Some("scratch"));
}

#[test]
fn given_comment_on_directory_when_parsing_then_kept_on_node() {
    let tree = parse("project/ # Project root\n").unwrap();
    let root = tree.top_level().next().unwrap();
    assert_eq!(root.comment.as_deref(), Some("Project root"));
}

#[test]
fn given_empty_input_when_parsing_then_empty_tree() {
    let tree = parse("\n   \n").unwrap();
    assert!(tree.is_empty());
}
