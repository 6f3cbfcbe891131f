use gbp_context::{ContextTree, Key, Node, NodeKind};

use crate::{Code, friend_prefix, indent, simplified, struct_qualified};

pub(crate) fn generate(tree: &ContextTree, key: Key<Node>) -> Code {
    let name = tree.name(key);
    let mut member_decls = Vec::new();
    let mut member_types = Vec::new();
    let mut member_names = Vec::new();
    let mut nested_decls = Vec::new();
    let mut nested_impls = Vec::new();

    for &child in tree.children(key) {
        match tree.kind(child) {
            NodeKind::Member => {
                member_decls.push(member(tree, child));
                member_types.push(member_type(tree, child));
                member_names.push(tree.name(child).to_owned());
            }
            NodeKind::Struct | NodeKind::Enum | NodeKind::EnumClass => {
                let code = crate::generate(tree, child);
                if !code.decl.is_empty() {
                    nested_decls.push(code.decl);
                }
                if !code.impl_.is_empty() {
                    nested_impls.push(code.impl_);
                }
            }
            _ => {}
        }
    }

    let qualified = struct_qualified(tree, key);
    let ostream = ostream_operator(&qualified, &member_names);

    let mut core = String::new();
    core.push_str("// methods\n");
    core.push_str(&format!("{name}() = default;\n"));
    core.push_str(&format!("{name}(const {name}&) = default;\n"));
    core.push_str(&format!("{name}& operator=(const {name}&) = default;\n"));
    core.push_str(&format!("{name}({name}&&) = default;\n"));
    core.push_str("\n// members\n");
    for decl in &nested_decls {
        core.push_str(decl);
        core.push('\n');
    }
    for decl in &member_decls {
        core.push_str(decl);
        core.push('\n');
    }
    core.push_str("// operators\n");
    core.push_str(&serialize(&member_names));

    let extra = extra_section(name, &member_types, &member_names);

    let decl = format!(
        "struct {name}\n{{\n{}\n#ifdef GBP_DECLARE_TYPE_GEN_ADDITIONALS\n{}\n#endif //GBP_DECLARE_TYPE_GEN_ADDITIONALS\n}};\n// related functions\n{}{}",
        indent(core.trim_end()),
        indent(&extra),
        friend_prefix(tree, key),
        ostream.decl,
    );

    let mut impls = Vec::new();
    if !member_names.is_empty() {
        impls.push(format!(
            "#ifdef GBP_DECLARE_TYPE_GEN_ADDITIONALS\n{}\n{}\n#endif //GBP_DECLARE_TYPE_GEN_ADDITIONALS",
            member_name_impls(&qualified, &member_names),
            get_member_impls(&qualified, &member_names),
        ));
    }
    impls.extend(nested_impls);
    impls.push(ostream.impl_);

    Code { decl, impl_: impls.join("\n") }
}

/// One member declaration, whitespace-normalized: `type name;` or
/// `type name = value;`.
pub(crate) fn member(tree: &ContextTree, key: Key<Node>) -> String {
    let name = tree.name(key);
    let mut member_type = "";
    let mut value = None;
    for &child in tree.children(key) {
        match tree.kind(child) {
            NodeKind::MemberType => member_type = tree.content(child),
            NodeKind::MemberValue => value = Some(tree.content(child)),
            _ => {}
        }
    }

    let decl = simplified(&format!("{member_type} {name}"));
    match value {
        Some(value) => {
            // The value group is usually written `(= 1.5)`; the `=` belongs
            // to the emitted declaration, not the value.
            let value = value.trim().trim_start_matches('=');
            format!("{decl} = {};", simplified(value))
        }
        None => format!("{decl};"),
    }
}

fn member_type(tree: &ContextTree, key: Key<Node>) -> String {
    tree.children(key)
        .iter()
        .find(|&&child| tree.kind(child) == NodeKind::MemberType)
        .map(|&child| simplified(tree.content(child)))
        .unwrap_or_default()
}

fn serialize(members: &[String]) -> String {
    let body = if members.is_empty() {
        "(void)ar;".to_owned()
    } else {
        format!("ar & {};", members.join(" & "))
    };
    format!("template<typename Archive>\nvoid serialize(Archive& ar) {{ {body} }}\n")
}

fn extra_section(name: &str, types: &[String], members: &[String]) -> String {
    let compares = if members.is_empty() {
        "true".to_owned()
    } else {
        members
            .iter()
            .map(|member| format!("{member} == other.{member}"))
            .collect::<Vec<_>>()
            .join(" && ")
    };

    let mut extra = String::from("// extra\n");
    extra.push_str(&format!("using types_as_tuple = std::tuple<{}>;\n", types.join(", ")));
    extra.push_str(&format!(
        "inline bool operator==(const {name}& other) const {{ return {compares}; }}\n"
    ));
    extra.push_str(&format!(
        "inline bool operator!=(const {name}& other) const {{ return !operator==(other); }}\n"
    ));
    extra.push_str(
        "template <int N> typename std::tuple_element<N, types_as_tuple>::type& get_member();\n",
    );
    extra.push_str(
        "template <int N> const typename std::tuple_element<N, types_as_tuple>::type& get_member() const;\n",
    );
    extra.push_str("template <int N> static const char* member_name();\n");
    extra.push_str(&apply_methods(members));
    extra.push_str(&compare_methods(name, members));
    extra.trim_end().to_owned()
}

fn apply_methods(members: &[String]) -> String {
    let calls = if members.is_empty() {
        "(void)f;".to_owned()
    } else {
        members
            .iter()
            .map(|member| format!("f(\"{member}\", {member});"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let body = indent(&calls);
    format!(
        "template <typename F> void apply(F&& f) {{\n{body}\n}}\ntemplate <typename F> void apply(F&& f) const {{\n{body}\n}}\n"
    )
}

fn compare_methods(name: &str, members: &[String]) -> String {
    let mut lines = vec!["bool result = false;".to_owned()];
    for i in 0..members.len() {
        lines.push(format!(
            "if (get_member<{i}>() != obj.get_member<{i}>()) {{ f(member_name<{i}>(), get_member<{i}>(), obj.get_member<{i}>()); result = true; }}"
        ));
    }
    lines.push("return result;".to_owned());
    let body = indent(&lines.join("\n"));
    format!(
        "template <typename F> bool compare(const {name}& obj, F&& f) const {{\n{body}\n}}\ntemplate <typename F> bool compare(const {name}& obj, F&& f) {{\n{body}\n}}\n"
    )
}

fn member_name_impls(qualified: &str, members: &[String]) -> String {
    members
        .iter()
        .enumerate()
        .map(|(i, member)| {
            format!("template <> const char* {qualified}::member_name<{i}>() {{ return \"{member}\"; }}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn get_member_impls(qualified: &str, members: &[String]) -> String {
    let mut lines = Vec::new();
    for (i, member) in members.iter().enumerate() {
        lines.push(format!(
            "template <>       typename std::tuple_element<{i}, {qualified}::types_as_tuple>::type& {qualified}::get_member<{i}>()       {{ return {member}; }}"
        ));
        lines.push(format!(
            "template <> const typename std::tuple_element<{i}, {qualified}::types_as_tuple>::type& {qualified}::get_member<{i}>() const {{ return {member}; }}"
        ));
    }
    lines.join("\n")
}

fn ostream_operator(qualified: &str, members: &[String]) -> Code {
    let chain = if members.is_empty() {
        "\"\"".to_owned()
    } else {
        members
            .iter()
            .map(|member| format!("\"{member}: \" << obj.{member}"))
            .collect::<Vec<_>>()
            .join(" << \", \" << ")
    };
    Code {
        decl: format!("std::ostream& operator<<(std::ostream& os, const {qualified}& obj);"),
        impl_: format!(
            "std::ostream& operator<<(std::ostream& os, const {qualified}& obj) {{\n    os << \"{{\" << {chain} << \"}}\";\n    return os;\n}}"
        ),
    }
}
