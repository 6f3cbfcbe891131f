use text_size::TextRange;

use crate::arena::{Arena, Key};

/// The kind of a context node. One variant per construct the classifier
/// recognizes; `None` marks swallowed text that carries no construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    None,
    Comment,
    LineComment,
    Struct,
    Member,
    MemberType,
    MemberValue,
    Enum,
    EnumClass,
    UnderlyingType,
    EnumItem,
    Namespace,
    Global,
    ExtraCode,
    Preproc,
    Typedef,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Comment => "Comment",
            Self::LineComment => "LineComment",
            Self::Struct => "Struct",
            Self::Member => "Member",
            Self::MemberType => "MemberType",
            Self::MemberValue => "MemberValue",
            Self::Enum => "Enum",
            Self::EnumClass => "EnumClass",
            Self::UnderlyingType => "UnderlyingType",
            Self::EnumItem => "EnumItem",
            Self::Namespace => "Namespace",
            Self::Global => "Global",
            Self::ExtraCode => "ExtraCode",
            Self::Preproc => "Preproc",
            Self::Typedef => "Typedef",
        }
    }

    /// Kinds that produce output on their own, without looking at children.
    pub fn is_emittable(self) -> bool {
        matches!(
            self,
            Self::Struct
                | Self::Member
                | Self::MemberType
                | Self::MemberValue
                | Self::Enum
                | Self::EnumClass
                | Self::UnderlyingType
                | Self::EnumItem
                | Self::Typedef
                | Self::Preproc
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, source-ordered span of the parsed buffer.
///
/// The range is absolute over the tree's text and excludes the construct's
/// trigger and terminator characters. Children are stored in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) name: String,
    pub(crate) range: TextRange,
    pub(crate) parent: Option<Key<Node>>,
    pub(crate) children: Vec<Key<Node>>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn parent(&self) -> Option<Key<Node>> {
        self.parent
    }

    pub fn children(&self) -> &[Key<Node>] {
        &self.children
    }
}

/// A finished, immutable context tree together with the source text it
/// spans. The root is always a `Global` node covering the whole buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextTree {
    pub(crate) text: Box<str>,
    pub(crate) nodes: Arena<Node>,
    pub(crate) root: Key<Node>,
}

impl ContextTree {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> Key<Node> {
        self.root
    }

    pub fn node(&self, key: Key<Node>) -> &Node {
        &self.nodes[key]
    }

    pub fn kind(&self, key: Key<Node>) -> NodeKind {
        self.nodes[key].kind
    }

    pub fn name(&self, key: Key<Node>) -> &str {
        &self.nodes[key].name
    }

    pub fn children(&self, key: Key<Node>) -> &[Key<Node>] {
        &self.nodes[key].children
    }

    pub fn parent(&self, key: Key<Node>) -> Option<Key<Node>> {
        self.nodes[key].parent
    }

    pub fn parent_kind(&self, key: Key<Node>) -> Option<NodeKind> {
        self.nodes[key].parent.map(|parent| self.nodes[parent].kind)
    }

    /// The text the node spans, trigger and terminator excluded.
    pub fn content(&self, key: Key<Node>) -> &str {
        let range: std::ops::Range<usize> = self.nodes[key].range.into();
        &self.text[range]
    }

    /// Walks ancestors from the node towards the root, excluding the node
    /// itself.
    pub fn ancestors(&self, key: Key<Node>) -> impl Iterator<Item = Key<Node>> + '_ {
        std::iter::successors(self.parent(key), |&key| self.parent(key))
    }

    /// True if the subtree below (and including) `key` contains anything the
    /// generator would emit. Wrappers without emittable content are skipped
    /// wholesale.
    pub fn has_emittable(&self, key: Key<Node>) -> bool {
        let node = &self.nodes[key];
        node.kind.is_emittable()
            || node.children.iter().any(|&child| self.has_emittable(child))
    }

    fn fmt_node(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        key: Key<Node>,
        depth: usize,
    ) -> std::fmt::Result {
        let node = &self.nodes[key];
        write!(f, "{:indent$}{}", "", node.kind, indent = depth * 2)?;
        if !node.name.is_empty() {
            write!(f, " \"{}\"", node.name)?;
        }
        writeln!(f)?;
        for &child in &node.children {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for ContextTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}
