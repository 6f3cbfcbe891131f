//! C++ boilerplate emission over a [`gbp_context::ContextTree`].
//!
//! Every node kind maps to a pair of strings: what goes into the generated
//! header and what goes into the generated source. Wrappers (`Global`,
//! `Namespace`) concatenate their children; `Struct` and the two enum kinds
//! expand into the full set of declared operations.

use gbp_context::{ContextTree, Key, Node, NodeKind};

mod enums;
mod structs;
#[cfg(test)]
mod tests;

/// Generated output split the way it is written to disk: declarations for
/// the header, definitions for the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    pub decl: String,
    pub impl_: String,
}

impl Code {
    fn decl_only(decl: String) -> Self {
        Self { decl, impl_: String::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.decl.is_empty() && self.impl_.is_empty()
    }
}

/// Generates code for the whole tree.
pub fn file(tree: &ContextTree) -> Code {
    generate(tree, tree.root())
}

pub fn generate(tree: &ContextTree, key: Key<Node>) -> Code {
    match tree.kind(key) {
        NodeKind::Global => global(tree, key),
        NodeKind::Namespace => namespace(tree, key),
        NodeKind::Struct => structs::generate(tree, key),
        NodeKind::Enum | NodeKind::EnumClass => enums::generate(tree, key),
        NodeKind::Member => Code::decl_only(structs::member(tree, key)),
        NodeKind::EnumItem => {
            Code::decl_only(tree.content(key).replace(',', "=").trim().to_owned())
        }
        NodeKind::UnderlyingType
        | NodeKind::MemberType
        | NodeKind::MemberValue
        | NodeKind::ExtraCode => Code::decl_only(tree.content(key).to_owned()),
        NodeKind::Preproc => Code::decl_only(format!("#{}", tree.content(key))),
        NodeKind::Typedef => Code::decl_only(format!("typedef{}", tree.content(key))),
        NodeKind::Comment => Code::decl_only(format!("/*{}*/", tree.content(key))),
        NodeKind::LineComment => Code::decl_only(format!("//{}", tree.content(key))),
        NodeKind::None => Code::default(),
    }
}

fn global(tree: &ContextTree, key: Key<Node>) -> Code {
    let mut decls = Vec::new();
    let mut impls = Vec::new();
    for &child in tree.children(key) {
        if !tree.has_emittable(child) {
            continue;
        }
        let code = generate(tree, child);
        if !code.decl.is_empty() {
            decls.push(code.decl);
        }
        if !code.impl_.is_empty() {
            impls.push(code.impl_);
        }
    }
    Code { decl: decls.join("\n"), impl_: impls.join("\n") }
}

fn namespace(tree: &ContextTree, key: Key<Node>) -> Code {
    if !tree.has_emittable(key) {
        return Code::default();
    }
    let name = tree.name(key);
    let inner = global(tree, key);
    let wrap = |body: String| {
        if body.is_empty() {
            return body;
        }
        format!("namespace {name}\n{{\n{body}\n}} //namespace {name}")
    };
    Code { decl: wrap(inner.decl), impl_: wrap(inner.impl_) }
}

/// Collapses runs of whitespace into single spaces and trims the ends.
fn simplified(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("    {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The node's name qualified with its enclosing structs. Used where
/// generated definitions refer to a nested type from namespace scope.
fn struct_qualified(tree: &ContextTree, key: Key<Node>) -> String {
    let mut parts = vec![tree.name(key)];
    let mut current = key;
    while let Some(parent) = tree.parent(current) {
        if tree.kind(parent) != NodeKind::Struct {
            break;
        }
        parts.push(tree.name(parent));
        current = parent;
    }
    parts.reverse();
    parts.join("::")
}

/// The fully qualified spelling shown to humans, namespaces included.
fn display_qualified(tree: &ContextTree, key: Key<Node>) -> String {
    let mut parts = vec![tree.name(key)];
    for ancestor in tree.ancestors(key) {
        if matches!(tree.kind(ancestor), NodeKind::Struct | NodeKind::Namespace) {
            parts.push(tree.name(ancestor));
        }
    }
    parts.reverse();
    parts.join("::")
}

/// Free functions declared inside a struct body need a `friend` prefix.
fn friend_prefix(tree: &ContextTree, key: Key<Node>) -> &'static str {
    match tree.parent_kind(key) {
        Some(NodeKind::Struct) => "friend ",
        _ => "",
    }
}
