use crate::go::{Color, Point, MAX_BOARD_SIZE};
use crate::sgf::{parser, Node, ParseSgfError};
use derive_more::{Display, Error, From};
use std::fmt::{self, Write};
use std::{fs, io, path::Path, str::FromStr};
use tracing::{instrument, warn};

/// The board size assumed by SGF when the root doesn't say otherwise.
pub const DEFAULT_BOARD_SIZE: u8 = 19;

/// A handle to a [`Node`] within a [`Tree`].
///
/// Defaults to the root.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default, Clone, Eq, PartialEq)]
struct Entry {
    node: Node,
    children: Vec<NodeId>,
}

/// A game record.
///
/// The first child of each node continues the main line, the others are variations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tree {
    entries: Vec<Entry>,
}

impl Default for Tree {
    fn default() -> Self {
        Tree {
            entries: vec![Entry::default()],
        }
    }
}

/// The reason why a [`Tree`] could not be loaded.
#[derive(Debug, Display, Error, From)]
pub enum LoadSgfError {
    #[display(fmt = "failed to read the game record")]
    Io(io::Error),
    #[display(fmt = "failed to parse the game record")]
    Parse(ParseSgfError),
}

impl Tree {
    /// Reads a game record from a file.
    #[instrument(level = "debug", err)]
    pub fn load(path: &Path) -> Result<Self, LoadSgfError> {
        Ok(fs::read_to_string(path)?.parse()?)
    }

    /// Writes this game record to a file.
    #[instrument(level = "debug", skip(self), err)]
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_string())
    }

    /// The first node of the game.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.entries[id.0].node
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.entries[id.0].node
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.entries[id.0].children
    }

    /// The node that continues the main line after `id`.
    pub fn main_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Walks the main line from the root.
    pub fn main_line(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(self.root()), |&id| self.main_child(id))
    }

    /// The board size declared at the root.
    ///
    /// Sizes that can't be represented fall back to the default.
    pub fn board_size(&self) -> u8 {
        let Some(sz) = self.node(self.root()).value("SZ") else {
            return DEFAULT_BOARD_SIZE;
        };

        let size = sz.split(':').next().and_then(|s| s.trim().parse().ok());
        match size.filter(|s| (1..=MAX_BOARD_SIZE).contains(s)) {
            Some(s) => s,
            None => {
                warn!(%sz, default = DEFAULT_BOARD_SIZE, "unsupported board size");
                DEFAULT_BOARD_SIZE
            }
        }
    }

    /// Appends a node to the children of `parent`, or makes it the root if there's no parent.
    pub(super) fn push(&mut self, parent: Option<NodeId>, node: Node) -> NodeId {
        let id = NodeId(self.entries.len());

        self.entries.push(Entry {
            node,
            children: Vec::new(),
        });

        if let Some(p) = parent {
            self.entries[p.0].children.push(id);
        }

        id
    }

    pub(super) fn empty() -> Self {
        Tree {
            entries: Vec::new(),
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a child to `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        self.push(Some(parent), node)
    }

    /// The color expected to move after `id`.
    pub fn next_turn(&self, id: NodeId) -> Color {
        let node = self.node(id);
        match (node.turn(), node.value("PL")) {
            (Some(c), _) => !c,
            (None, Some("W" | "w")) => Color::White,
            _ => Color::Black,
        }
    }

    /// Plays `point` after `parent`, reusing an existing child if it already plays the same move.
    ///
    /// If no color is given, the color expected to move after `parent` is used.
    pub fn try_move(&mut self, parent: NodeId, point: Point, color: Option<Color>) -> NodeId {
        let color = color.unwrap_or_else(|| self.next_turn(parent));
        let value = point.to_sgf();

        let existing = self.children(parent).iter().copied().find(|&c| {
            let node = self.node(c);
            node.turn() == Some(color) && node.value(color.property()) == Some(&value)
        });

        existing.unwrap_or_else(|| {
            let mut node = Node::default();
            node.set_value(color.property(), value);
            self.add_child(parent, node)
        })
    }

    fn write_sequence(&self, f: &mut fmt::Formatter<'_>, mut id: NodeId) -> fmt::Result {
        loop {
            f.write_char(';')?;

            for (key, values) in self.node(id).properties() {
                f.write_str(key)?;
                for v in values {
                    write!(f, "[{}]", escape(v))?;
                }
            }

            match self.children(id) {
                [] => return Ok(()),
                [next] => id = *next,
                variations => {
                    for &v in variations {
                        f.write_str("\n(")?;
                        self.write_sequence(f, v)?;
                        f.write_char(')')?;
                    }

                    return Ok(());
                }
            }
        }
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace(']', "\\]")
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        self.write_sequence(f, self.root())?;
        f.write_str(")\n")
    }
}

impl FromStr for Tree {
    type Err = ParseSgfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}
