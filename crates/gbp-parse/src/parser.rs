use gbp_context::{Builder, ContextTree, Key, Node, NodeKind, Unterminated};
use text_size::TextSize;

use crate::classifier::{self, Active, Trigger};

/// Everything the single pass produced: the tree plus the constructs that
/// were still open when the input ran out.
pub struct Parse {
    pub tree: ContextTree,
    pub unterminated: Vec<Unterminated>,
}

pub(crate) struct Parser {
    builder: Builder,
}

impl Parser {
    pub(crate) fn new(text: &str) -> Self {
        Self { builder: Builder::new(text) }
    }

    pub(crate) fn run(mut self) -> Parse {
        while self.builder.bump() {
            self.classify();
        }
        let (tree, mut unterminated) = self.builder.finish();
        // End of input terminates line-oriented constructs as well as a
        // newline would.
        unterminated.retain(|open| {
            !matches!(open.kind, NodeKind::LineComment | NodeKind::Preproc | NodeKind::Typedef)
        });
        Parse { tree, unterminated }
    }

    fn classify(&mut self) {
        let active = Active {
            kind: self.builder.active_kind(),
            tail: self.builder.tail(),
            armed: self.builder.armed(),
            has_children: self.builder.active_has_children(),
            named: self.builder.active_named(),
        };
        let kind = active.kind;

        if let Some(trigger) = classifier::open(&active) {
            self.apply(trigger);
        } else if classifier::closed(&active) {
            let ends_member_list = kind == NodeKind::Member && active.tail.ends_with(')');
            self.builder.finish_node(classifier::close_trim(kind));
            // The `)` that closes a member without a trailing comma is the
            // macro's own closing paren.
            if ends_member_list && self.builder.active_kind() == NodeKind::Struct {
                self.builder.disarm();
            }
        }
    }

    fn apply(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Open(kind) => {
                let key = self.builder.start_node(kind);
                match kind {
                    NodeKind::Struct
                    | NodeKind::Namespace
                    | NodeKind::Enum
                    | NodeKind::EnumClass
                    | NodeKind::EnumItem => self.take_ident(key),
                    NodeKind::UnderlyingType => self.take_type(key),
                    _ => {}
                }
            }
            Trigger::Arm => self.builder.arm(),
            Trigger::Disarm => self.builder.disarm(),
            Trigger::Member => {
                self.builder.start_node(NodeKind::Member);
                let key = self.builder.start_node(NodeKind::MemberType);
                self.take_type(key);
            }
            Trigger::MemberName => {
                let (skip, len, extra) = classifier::member_name(self.builder.rest());
                if len > 0 {
                    let name = self.builder.rest()[skip..skip + len].to_owned();
                    let key = self.builder.active();
                    self.builder.set_name(key, &name);
                    self.builder.consume(TextSize::new((skip + len + extra) as u32));
                }
            }
        }
    }

    /// Pulls the identifier following the trigger into the freshly opened
    /// node and names it. Anonymous constructs stay unnamed.
    fn take_ident(&mut self, key: Key<Node>) {
        let (skip, len) = classifier::ident_name(self.builder.rest());
        if len > 0 {
            let name = self.builder.rest()[skip..skip + len].to_owned();
            self.builder.set_name(key, &name);
            self.builder.consume(TextSize::new((skip + len) as u32));
        }
    }

    fn take_type(&mut self, key: Key<Node>) {
        let (skip, len) = classifier::type_text(self.builder.rest());
        if len > 0 {
            let name = self.builder.rest()[skip..skip + len].trim().to_owned();
            self.builder.set_name(key, &name);
            self.builder.consume(TextSize::new((skip + len) as u32));
        }
    }
}
