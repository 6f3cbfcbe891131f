//! Suffix-driven classification rules.
//!
//! The driver feeds one character at a time; after each character it asks
//! whether the active node's tail now triggers a new construct, and failing
//! that, whether it terminates the active node. Only the deepest open node
//! classifies, so a `struct ` inside a comment stays plain text.

use gbp_context::NodeKind;
use text_size::TextSize;

/// What the driver needs to know about the deepest open node.
pub(crate) struct Active<'a> {
    pub(crate) kind: NodeKind,
    /// Text accumulated in the node so far, current character included.
    pub(crate) tail: &'a str,
    pub(crate) armed: bool,
    pub(crate) has_children: bool,
    pub(crate) named: bool,
}

pub(crate) enum Trigger {
    Open(NodeKind),
    /// `GBP_DECLARE_TYPE(` seen: the enclosing struct starts taking members.
    Arm,
    /// `)` reached an armed struct directly, so the macro had no members.
    Disarm,
    /// `(` of a member's type group.
    Member,
    /// `(` of a member's name group.
    MemberName,
}

pub(crate) fn open(active: &Active<'_>) -> Option<Trigger> {
    use NodeKind::{
        Comment, Enum, EnumClass, EnumItem, ExtraCode, Global, LineComment, Member, MemberValue,
        Namespace, Preproc, Struct, Typedef, UnderlyingType,
    };

    // Nothing nests inside comments.
    if matches!(active.kind, Comment | LineComment) {
        return None;
    }

    let tail = active.tail;
    if tail.ends_with("/*") {
        return Some(Trigger::Open(Comment));
    }
    if tail.ends_with("//") {
        return Some(Trigger::Open(LineComment));
    }

    if active.kind == Global && tail.ends_with('#') {
        return Some(Trigger::Open(Preproc));
    }
    if matches!(active.kind, Global | Namespace) && tail.ends_with("namespace ") {
        return Some(Trigger::Open(Namespace));
    }

    let in_scope =
        matches!(active.kind, Global | Namespace) || (active.kind == Struct && !active.armed);
    if in_scope {
        if tail.ends_with("struct ") || tail.ends_with("class ") {
            return Some(Trigger::Open(Struct));
        }
        if tail.ends_with("typedef") {
            return Some(Trigger::Open(Typedef));
        }
    }

    if active.kind == Struct && !active.armed {
        if tail.ends_with("GBP_DECLARE_TYPE(") {
            return Some(Trigger::Arm);
        }
        if tail.ends_with("GBP_DECLARE_ENUM_SIMPLE(") {
            return Some(Trigger::Open(Enum));
        }
        if tail.ends_with("GBP_DECLARE_ENUM(") {
            return Some(Trigger::Open(EnumClass));
        }
    }

    match active.kind {
        // The comma after the enum's name; later commas separate items.
        EnumClass if !active.has_children && tail.ends_with(',') => {
            Some(Trigger::Open(UnderlyingType))
        }
        Enum | EnumClass if tail.ends_with('(') => Some(Trigger::Open(EnumItem)),
        Struct if active.armed && tail.ends_with('(') => Some(Trigger::Member),
        Struct if active.armed && tail.ends_with(')') => Some(Trigger::Disarm),
        Member if tail.ends_with('(') => Some(if active.named {
            Trigger::Open(MemberValue)
        } else {
            Trigger::MemberName
        }),
        // Parenthesized expressions in a default value nest so their closing
        // paren does not end the value early.
        MemberValue | ExtraCode if tail.ends_with('(') => Some(Trigger::Open(ExtraCode)),
        _ => None,
    }
}

pub(crate) fn closed(active: &Active<'_>) -> bool {
    use NodeKind::{
        Comment, Enum, EnumClass, EnumItem, ExtraCode, LineComment, Member, MemberType,
        MemberValue, Namespace, Preproc, Struct, Typedef, UnderlyingType,
    };

    let tail = active.tail;
    match active.kind {
        Comment => tail.ends_with("*/"),
        LineComment | Preproc | Typedef => tail.ends_with('\n'),
        UnderlyingType => tail.ends_with(','),
        Namespace | Struct => tail.ends_with('}'),
        Member => tail.ends_with(')') || tail.ends_with(','),
        MemberType | MemberValue | Enum | EnumClass | EnumItem | ExtraCode => tail.ends_with(')'),
        _ => false,
    }
}

/// Bytes of terminator to trim off the closing node's span.
pub(crate) fn close_trim(kind: NodeKind) -> TextSize {
    let trim = match kind {
        NodeKind::Comment => 2,
        _ => 1,
    };
    TextSize::new(trim)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// An identifier after optional whitespace: `(skip, len)` byte counts into
/// `rest`. Both zero when the next non-whitespace character cannot start an
/// identifier.
pub(crate) fn ident_name(rest: &str) -> (usize, usize) {
    let skip = rest.len() - rest.trim_start().len();
    let name = &rest[skip..];
    match name.chars().next() {
        Some(c) if is_ident_start(c) => {
            let len = name.find(|c| !is_ident_continue(c)).unwrap_or(name.len());
            (skip, len)
        }
        _ => (0, 0),
    }
}

/// A member's name group: the identifier plus, when it directly follows, the
/// group's closing paren. Returns `(skip, len, extra)` where `extra` covers
/// trailing whitespace and the swallowed `)`.
pub(crate) fn member_name(rest: &str) -> (usize, usize, usize) {
    let (skip, len) = ident_name(rest);
    if len == 0 {
        return (0, 0, 0);
    }
    let after = &rest[skip + len..];
    let ws = after.len() - after.trim_start().len();
    let extra = if after[ws..].starts_with(')') { ws + 1 } else { 0 };
    (skip, len, extra)
}

/// A type spelling: skips leading newlines, then takes the longest run of
/// characters that can appear in a C++ type. `(skip, len)` byte counts.
pub(crate) fn type_text(rest: &str) -> (usize, usize) {
    let skip = rest.len() - rest.trim_start_matches('\n').len();
    let body = &rest[skip..];
    let len = body
        .find(|c: char| {
            !(is_ident_continue(c) || matches!(c, ':' | ' ' | '\t' | '*' | '&' | '<' | '>'))
        })
        .unwrap_or(body.len());
    (skip, len)
}
