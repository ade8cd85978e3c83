//! Output module tree and file rendering.
//!
//! Modules live in an arena owned by the compilation session. Each module
//! holds an ordered list of items: rendered declaration text or a child module
//! handle. A module is written to its own file unless it is inline (or the
//! output mode forces everything into a single file).

use std::fmt::Write;

use weaver_core::{PathCursor, Worklist};

use crate::config::OutputMode;
use crate::graph::NamespaceId;

const INDENT: &str = "    ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(u32);

impl ModuleId {
    pub const ROOT: ModuleId = ModuleId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Crate,
    Super,
    Private,
}

impl Visibility {
    /// Visibility qualifier including its trailing space (empty for private).
    pub fn prefix(&self) -> &'static str {
        match self {
            Visibility::Public => "pub ",
            Visibility::Crate => "pub(crate) ",
            Visibility::Super => "pub(super) ",
            Visibility::Private => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleItem {
    Text(String),
    Module(ModuleId),
}

#[derive(Clone, Debug)]
pub struct Module {
    pub name: String,
    pub cursor: PathCursor,
    /// Namespace this module was created for, if any.
    pub namespace: Option<NamespaceId>,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub inline: bool,
    pub items: Vec<ModuleItem>,
}

/// A rendered source file, path relative to the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    pub path: String,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct ModuleTree {
    modules: Vec<Module>,
}

impl Default for ModuleTree {
    fn default() -> Self {
        Self {
            modules: vec![Module {
                name: String::new(),
                cursor: PathCursor::root(),
                namespace: None,
                doc: None,
                visibility: Visibility::Public,
                inline: false,
                items: Vec::new(),
            }],
        }
    }
}

impl ModuleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a module and attach it as the last item of `parent`.
    pub fn add_child(
        &mut self,
        parent: ModuleId,
        name: impl Into<String>,
        visibility: Visibility,
        inline: bool,
    ) -> ModuleId {
        let name = name.into();
        let id = ModuleId(self.modules.len() as u32);
        let cursor = self.module(parent).cursor.enter([name.as_str()]);
        self.modules.push(Module {
            name,
            cursor,
            namespace: None,
            doc: None,
            visibility,
            inline,
            items: Vec::new(),
        });
        self.module_mut(parent).items.push(ModuleItem::Module(id));
        id
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.index()]
    }

    pub fn root(&self) -> &Module {
        self.module(ModuleId::ROOT)
    }

    pub fn push_text(&mut self, id: ModuleId, text: impl Into<String>) {
        self.module_mut(id).items.push(ModuleItem::Text(text.into()));
    }

    pub fn children(&self, id: ModuleId) -> impl Iterator<Item = ModuleId> + '_ {
        self.module(id).items.iter().filter_map(|item| match item {
            ModuleItem::Module(child) => Some(*child),
            ModuleItem::Text(_) => None,
        })
    }

    pub fn find_child(&self, parent: ModuleId, name: &str) -> Option<ModuleId> {
        self.children(parent)
            .find(|child| self.module(*child).name == name)
    }

    /// Look a module up by its absolute cursor.
    pub fn find(&self, cursor: &PathCursor) -> Option<ModuleId> {
        let mut current = ModuleId::ROOT;
        for name in cursor.path() {
            current = self.find_child(current, name)?;
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Render one file per non-inline module, root first, then breadth-first.
    pub fn render_files(&self, mode: OutputMode, generator: &str) -> Vec<OutputFile> {
        let force_inline = mode == OutputMode::SingleFile;
        let mut pending = Worklist::new();
        pending.add(ModuleId::ROOT);

        let mut files = Vec::new();
        while let Some(id) = pending.take() {
            let module = self.module(id);
            let mut text = format!("// Generated by {generator}. Do not edit.\n");
            if let Some(doc) = &module.doc {
                text.push('\n');
                for line in doc.lines() {
                    push_doc_line(&mut text, "", "//!", line);
                }
            }
            self.write_items(id, force_inline, 0, &mut text, &mut pending);

            files.push(OutputFile {
                path: self.file_path(id, force_inline),
                text,
            });
        }
        files
    }

    fn file_path(&self, id: ModuleId, force_inline: bool) -> String {
        let module = self.module(id);
        if module.cursor.is_root() {
            return "mod.rs".to_string();
        }

        let stem = module.cursor.path().join("/");
        let has_file_children =
            !force_inline && self.children(id).any(|child| !self.module(child).inline);
        if has_file_children {
            format!("{stem}/mod.rs")
        } else {
            format!("{stem}.rs")
        }
    }

    fn write_items(
        &self,
        id: ModuleId,
        force_inline: bool,
        depth: usize,
        out: &mut String,
        pending: &mut Worklist<ModuleId>,
    ) {
        let indent = INDENT.repeat(depth);
        for (i, item) in self.module(id).items.iter().enumerate() {
            if i > 0 || depth == 0 {
                out.push('\n');
            }
            match item {
                ModuleItem::Text(text) => {
                    for line in text.trim_end().lines() {
                        if line.is_empty() {
                            out.push('\n');
                        } else {
                            let _ = writeln!(out, "{indent}{line}");
                        }
                    }
                }
                ModuleItem::Module(child) => {
                    let module = self.module(*child);
                    let vis = module.visibility.prefix();
                    let name = &module.name;
                    if force_inline || module.inline {
                        if let Some(doc) = &module.doc {
                            for line in doc.lines() {
                                push_doc_line(out, &indent, "///", line);
                            }
                        }
                        let _ = writeln!(out, "{indent}{vis}mod {name} {{");
                        self.write_items(*child, true, depth + 1, out, pending);
                        let _ = writeln!(out, "{indent}}}");
                    } else {
                        let _ = writeln!(out, "{indent}{vis}mod {name};");
                        pending.add(*child);
                    }
                }
            }
        }
    }
}

fn push_doc_line(out: &mut String, indent: &str, marker: &str, line: &str) {
    if line.is_empty() {
        let _ = writeln!(out, "{indent}{marker}");
    } else {
        let _ = writeln!(out, "{indent}{marker} {line}");
    }
}
