use gbp_context::{ContextTree, Key, Node, NodeKind};

use crate::{Code, display_qualified, friend_prefix, indent, struct_qualified};

const DEFAULT_UNDERLYING: &str = "std::uint8_t";

pub(crate) fn generate(tree: &ContextTree, key: Key<Node>) -> Code {
    let name = tree.name(key);
    let mut underlying = None;
    let mut item_names = Vec::new();
    let mut item_decls = Vec::new();

    for &child in tree.children(key) {
        match tree.kind(child) {
            NodeKind::EnumItem if !tree.name(child).is_empty() => {
                item_names.push(tree.name(child));
                // `(Red, 3)` declares an explicit value; in the emitted
                // enumerator that comma is the `=` sign.
                item_decls.push(tree.content(child).replace(',', "=").trim().to_owned());
            }
            NodeKind::UnderlyingType => underlying = Some(tree.content(child).trim()),
            _ => {}
        }
    }

    let head = match tree.kind(key) {
        NodeKind::EnumClass => {
            format!("enum class {name} : {}", underlying.unwrap_or(DEFAULT_UNDERLYING))
        }
        _ => format!("enum {name}"),
    };

    let qualified = struct_qualified(tree, key);
    let display = display_qualified(tree, key);
    let friend = friend_prefix(tree, key);

    let decl = format!(
        "{head}\n{{\n{}\n}};\n// related functions\n{friend}const char* enum_cast({qualified} e, bool is_full_name = false);\n{friend}std::ostream& operator<<(std::ostream& os, {qualified} e);",
        indent(&item_decls.join(",\n")),
    );

    let cases = item_names
        .iter()
        .map(|item| {
            format!(
                "case {qualified}::{item}: return is_full_name ? \"{display}::{item}\" : \"{item}\";"
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let impl_ = format!(
        "const char* enum_cast({qualified} e, bool is_full_name) {{\n    switch (e) {{\n{}\n    }}\n    return \"\";\n}}\nstd::ostream& operator<<(std::ostream& os, {qualified} e) {{\n    os << enum_cast(e);\n    return os;\n}}",
        indent(&cases),
    );

    Code { decl, impl_ }
}
