use indoc::indoc;

use crate::config::OutputMode;
use crate::module::{ModuleId, ModuleTree, Visibility};

fn sample_tree() -> ModuleTree {
    let mut tree = ModuleTree::new();
    let models = tree.add_child(ModuleId::ROOT, "models", Visibility::Public, false);
    let all = tree.add_child(models, "all", Visibility::Public, false);
    tree.push_text(all, "pub struct Pet {\n    pub name: String,\n}\n");
    let inner = tree.add_child(all, "inner", Visibility::Crate, true);
    tree.module_mut(inner).doc = Some("Inline helpers.".to_string());
    tree.push_text(inner, "pub type Id = u32;");
    tree
}

#[test]
fn cursors_follow_the_tree() {
    let tree = sample_tree();
    let all = tree
        .find(&weaver_core::PathCursor::new(["models", "all"]))
        .unwrap();

    assert_eq!(tree.module(all).cursor.path(), ["models", "all"]);
    assert_eq!(tree.children(all).count(), 1);
    assert!(tree.find_child(ModuleId::ROOT, "http").is_none());
}

#[test]
fn directory_mode_writes_one_file_per_module() {
    let tree = sample_tree();
    let files = tree.render_files(OutputMode::Directory, "weaver");

    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, ["mod.rs", "models/mod.rs", "models/all.rs"]);

    assert_eq!(
        files[0].text,
        indoc! {"
            // Generated by weaver. Do not edit.

            pub mod models;
        "}
    );
    assert_eq!(
        files[2].text,
        indoc! {"
            // Generated by weaver. Do not edit.

            pub struct Pet {
                pub name: String,
            }

            /// Inline helpers.
            pub(crate) mod inner {
                pub type Id = u32;
            }
        "}
    );
}

#[test]
fn single_file_mode_inlines_everything() {
    let tree = sample_tree();
    let files = tree.render_files(OutputMode::SingleFile, "weaver");

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "mod.rs");
    insta::assert_snapshot!(files[0].text, @r"
    // Generated by weaver. Do not edit.

    pub mod models {
        pub mod all {
            pub struct Pet {
                pub name: String,
            }

            /// Inline helpers.
            pub(crate) mod inner {
                pub type Id = u32;
            }
        }
    }
    ");
}

#[test]
fn module_docs_become_inner_docs() {
    let mut tree = ModuleTree::new();
    tree.module_mut(ModuleId::ROOT).doc = Some("Pet store.\n\nGenerated models.".to_string());
    let files = tree.render_files(OutputMode::Directory, "weaver");

    assert_eq!(
        files[0].text,
        "// Generated by weaver. Do not edit.\n\n//! Pet store.\n//!\n//! Generated models.\n"
    );
}
