use crate::sgf::{Node, NodeId, ParseSgfError, Tree};
use std::{iter::Peekable, str::CharIndices};

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseSgfError> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((at, found)) => Err(ParseSgfError::Unexpected { found, at }),
            None => Err(ParseSgfError::UnexpectedEof),
        }
    }

    fn game_tree(&mut self, tree: &mut Tree, parent: Option<NodeId>) -> Result<(), ParseSgfError> {
        self.expect('(')?;
        self.skip_whitespace();

        let mut last = parent;
        while self.peek() == Some(';') {
            self.chars.next();
            let node = self.node()?;
            last = Some(tree.push(last, node));
            self.skip_whitespace();
        }

        while self.peek() == Some('(') {
            self.game_tree(tree, last)?;
            self.skip_whitespace();
        }

        self.expect(')')
    }

    fn node(&mut self) -> Result<Node, ParseSgfError> {
        let mut node = Node::default();

        loop {
            self.skip_whitespace();

            let mut key = String::new();
            while let Some((_, c)) = self.chars.next_if(|(_, c)| c.is_ascii_alphabetic()) {
                // FF[3] allows lower case letters within property identifiers.
                if c.is_ascii_uppercase() {
                    key.push(c);
                }
            }

            if key.is_empty() {
                return Ok(node);
            }

            self.skip_whitespace();
            if self.peek() != Some('[') {
                return match self.chars.next() {
                    Some((at, found)) => Err(ParseSgfError::Unexpected { found, at }),
                    None => Err(ParseSgfError::UnexpectedEof),
                };
            }

            while self.peek() == Some('[') {
                self.chars.next();
                let value = self.value()?;
                node.add_value(&key, value);
                self.skip_whitespace();
            }
        }
    }

    fn value(&mut self) -> Result<String, ParseSgfError> {
        let mut value = String::new();

        loop {
            match self.chars.next() {
                None => return Err(ParseSgfError::UnexpectedEof),
                Some((_, ']')) => return Ok(value),
                Some((_, '\\')) => match self.chars.next() {
                    None => return Err(ParseSgfError::UnexpectedEof),
                    // Soft line breaks are removed.
                    Some((_, '\n')) => {
                        self.chars.next_if(|&(_, c)| c == '\r');
                    }
                    Some((_, '\r')) => {
                        self.chars.next_if(|&(_, c)| c == '\n');
                    }
                    Some((_, c)) => value.push(c),
                },
                Some((_, c)) => value.push(c),
            }
        }
    }
}

/// Parses the first game of an SGF collection.
pub(super) fn parse(s: &str) -> Result<Tree, ParseSgfError> {
    let mut parser = Parser {
        chars: s.char_indices().peekable(),
    };

    // Anything before the first game tree is ignored.
    while parser.peek().is_some_and(|c| c != '(') {
        parser.chars.next();
    }

    if parser.peek().is_none() {
        return Err(ParseSgfError::Empty);
    }

    let mut tree = Tree::empty();
    parser.game_tree(&mut tree, None)?;

    if tree.is_empty() {
        return Err(ParseSgfError::Empty);
    }

    Ok(tree)
}
