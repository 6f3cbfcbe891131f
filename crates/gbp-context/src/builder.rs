use text_size::{TextLen, TextRange, TextSize};

use crate::arena::{Arena, Key};
use crate::tree::{ContextTree, Node, NodeKind};

/// A node that was still open when the input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unterminated {
    pub kind: NodeKind,
    pub range: TextRange,
}

struct OpenNode {
    key: Key<Node>,
    /// A `GBP_DECLARE_TYPE(` was seen in this struct and its closing paren
    /// has not arrived yet; every `(` until then starts a member.
    armed: bool,
}

/// Incremental construction of a [`ContextTree`].
///
/// The builder owns the whole buffer and a stack of open nodes from the
/// `Global` root down to the active leaf. The driver advances the position
/// one character at a time and opens/closes nodes as its classifier decides;
/// spans of all open nodes grow implicitly with the position. Once a node is
/// finished it is promoted into its parent's child list and never mutates
/// again.
pub struct Builder {
    text: Box<str>,
    nodes: Arena<Node>,
    open: Vec<OpenNode>,
    pos: TextSize,
}

impl Builder {
    pub fn new(text: &str) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node {
            kind: NodeKind::Global,
            name: String::new(),
            range: TextRange::empty(TextSize::new(0)),
            parent: None,
            children: Vec::new(),
        });
        Self {
            text: text.into(),
            nodes,
            open: vec![OpenNode { key: root, armed: false }],
            pos: TextSize::new(0),
        }
    }

    pub fn pos(&self) -> TextSize {
        self.pos
    }

    /// Text not yet consumed.
    pub fn rest(&self) -> &str {
        &self.text[usize::from(self.pos)..]
    }

    /// Advances past the next character. Returns false at end of input.
    pub fn bump(&mut self) -> bool {
        match self.rest().chars().next() {
            Some(c) => {
                self.pos += c.text_len();
                true
            }
            None => false,
        }
    }

    /// Advances past `len` bytes at once, e.g. an extracted name. The skipped
    /// text still belongs to the spans of every open node.
    pub fn consume(&mut self, len: TextSize) {
        self.pos += len;
        debug_assert!(usize::from(self.pos) <= self.text.len());
    }

    fn active_entry(&self) -> &OpenNode {
        self.open.last().expect("the global root is always open")
    }

    pub fn active(&self) -> Key<Node> {
        self.active_entry().key
    }

    pub fn active_kind(&self) -> NodeKind {
        self.nodes[self.active()].kind
    }

    pub fn active_named(&self) -> bool {
        !self.nodes[self.active()].name.is_empty()
    }

    pub fn active_has_children(&self) -> bool {
        !self.nodes[self.active()].children.is_empty()
    }

    /// The text accumulated so far in the active node, including the current
    /// character. Classification is suffix-driven over this slice.
    pub fn tail(&self) -> &str {
        let start = self.nodes[self.active()].range.start();
        &self.text[usize::from(start)..usize::from(self.pos)]
    }

    pub fn armed(&self) -> bool {
        self.active_entry().armed
    }

    pub fn arm(&mut self) {
        self.open.last_mut().expect("the global root is always open").armed = true;
    }

    pub fn disarm(&mut self) {
        self.open.last_mut().expect("the global root is always open").armed = false;
    }

    /// Opens a child of the active node starting at the current position.
    pub fn start_node(&mut self, kind: NodeKind) -> Key<Node> {
        let parent = self.active();
        let key = self.nodes.alloc(Node {
            kind,
            name: String::new(),
            range: TextRange::empty(self.pos),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.open.push(OpenNode { key, armed: false });
        key
    }

    pub fn set_name(&mut self, key: Key<Node>, name: &str) {
        self.nodes[key].name = name.into();
    }

    /// Closes the active node, trimming `trim` bytes of terminator off its
    /// span, and promotes it into its parent's child list.
    pub fn finish_node(&mut self, trim: TextSize) {
        let OpenNode { key, .. } = self.open.pop().expect("no open node to finish");
        let node = &mut self.nodes[key];
        let end = self.pos.checked_sub(trim).unwrap_or_default().max(node.range.start());
        node.range = TextRange::new(node.range.start(), end);
        let parent = node.parent.expect("only the global root has no parent");
        self.nodes[parent].children.push(key);
    }

    /// Delivers the end-of-input sentinel: force-closes whatever is still
    /// open, closes `Global`, and freezes the tree. Nodes other than the
    /// root that were still open are reported back.
    pub fn finish(mut self) -> (ContextTree, Vec<Unterminated>) {
        let mut unterminated = Vec::new();
        while self.open.len() > 1 {
            let key = self.active();
            let node = &self.nodes[key];
            unterminated.push(Unterminated {
                kind: node.kind,
                range: TextRange::new(node.range.start(), self.pos),
            });
            self.finish_node(TextSize::new(0));
        }
        unterminated.reverse();

        let root = self.open.pop().expect("the global root is always open").key;
        self.nodes[root].range = TextRange::up_to(self.text.text_len());
        (ContextTree { text: self.text, nodes: self.nodes, root }, unterminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_nest_and_trim() {
        //                0123456789
        let mut builder = Builder::new("ab(cd)ef");
        builder.bump(); // a
        builder.bump(); // b
        builder.bump(); // (
        let inner = builder.start_node(NodeKind::EnumItem);
        builder.bump(); // c
        builder.bump(); // d
        builder.bump(); // )
        builder.finish_node(TextSize::new(1));
        while builder.bump() {}
        let (tree, unterminated) = builder.finish();

        assert!(unterminated.is_empty());
        assert_eq!(tree.name(tree.root()), "");
        assert_eq!(tree.node(inner).range(), TextRange::new(3.into(), 5.into()));
        assert_eq!(tree.content(inner), "cd");
        assert_eq!(tree.node(tree.root()).range(), TextRange::new(0.into(), 8.into()));
        assert_eq!(tree.children(tree.root()), [inner]);
    }

    #[test]
    fn consumed_text_belongs_to_the_open_node() {
        let mut builder = Builder::new("xyz)");
        let node = builder.start_node(NodeKind::MemberType);
        builder.consume(TextSize::new(3));
        builder.bump(); // )
        builder.finish_node(TextSize::new(1));
        while builder.bump() {}
        let (tree, _) = builder.finish();

        assert_eq!(tree.content(node), "xyz");
    }

    #[test]
    fn eof_force_closes_open_nodes_innermost_last() {
        let mut builder = Builder::new("abc");
        builder.bump();
        let outer = builder.start_node(NodeKind::Namespace);
        builder.bump();
        let inner = builder.start_node(NodeKind::Struct);
        builder.bump();
        let (tree, unterminated) = builder.finish();

        assert_eq!(
            unterminated.iter().map(|u| u.kind).collect::<Vec<_>>(),
            [NodeKind::Namespace, NodeKind::Struct],
        );
        assert_eq!(tree.parent(inner), Some(outer));
        assert_eq!(tree.children(outer), [inner]);
        assert_eq!(tree.node(inner).range().end(), 3.into());
    }

    #[test]
    fn single_active_path() {
        let mut builder = Builder::new("abcd");
        builder.bump();
        builder.start_node(NodeKind::Namespace);
        builder.bump();
        builder.start_node(NodeKind::Struct);
        assert_eq!(builder.open.len(), 3);
        builder.finish_node(TextSize::new(0));
        assert_eq!(builder.active_kind(), NodeKind::Namespace);
        let (_, unterminated) = builder.finish();
        assert_eq!(unterminated.len(), 1);
    }
}
