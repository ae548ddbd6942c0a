//! Bracket notation for zip trees
//!
//! ```text
//! zip_tree -> chain | snarl
//! chain    -> '[' element (',' distance ',' element)* ']'
//! element  -> seed | chain | snarl
//! snarl    -> '(' entry* boundary ')'
//! entry    -> '(' distance (',' distance)* ',' chain ')'
//! boundary -> '(' distance (',' distance)* ')'
//! ```
//!
//! Entry `i` lists `i + 1` distances (left boundary, then the right side of
//! each earlier chain); the boundary lists the crossing length followed by
//! one distance per chain. Seeds are quoted strings or bare identifiers,
//! distances are integers or `inf`. Trailing commas are accepted.

use thiserror::Error;

use crate::tree::{Chain, ChainEntry, Distance, Element, Snarl, StructureError, ZipTree, UNREACHABLE};

/// Reference example: ten seeds, three snarls, two levels of nesting.
pub const EXAMPLE: &str = r#"["a", 5, ((1, ["b"]), (1, 0)), 10, "c", 4, "d", 3,
 ((2, ["e", 4, ((2, ["f"]), (3, 0)), 6, "g"]), (4, 2, ["h"]), (1, 2, 1)), 7, "i", 2, "j"]"#;

/// Reader limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotationConfig {
    /// Deepest chain/snarl nesting accepted.
    pub max_depth: usize,
}

impl Default for NotationConfig {
    fn default() -> Self {
        Self { max_depth: 1024 }
    }
}

/// Errors raised while reading bracket notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Input ended inside a construct.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A different token was required here.
    #[error("expected {expected} at offset {offset}, found '{found}'")]
    Expected {
        /// Description of the required token.
        expected: &'static str,
        /// Byte offset of the offending character.
        offset: usize,
        /// Character actually found.
        found: char,
    },

    /// Distance literal was not a non-negative integer or `inf`.
    #[error("invalid distance '{text}' at offset {offset}")]
    InvalidDistance {
        /// Literal as written.
        text: String,
        /// Byte offset of the literal.
        offset: usize,
    },

    /// Nesting exceeded `NotationConfig::max_depth`.
    #[error("nesting exceeds {limit} levels")]
    TooDeep {
        /// Configured limit.
        limit: usize,
    },

    /// Input continued after the root element.
    #[error("trailing input at offset {offset}")]
    TrailingInput {
        /// Byte offset of the first unread character.
        offset: usize,
    },

    /// Tuples had the wrong arity.
    #[error("invalid structure: {0}")]
    Structure(#[from] StructureError),
}

/// Read a zip tree written in bracket notation.
pub fn parse_tree(text: &str, config: &NotationConfig) -> Result<ZipTree<String>, NotationError> {
    let mut reader = Reader {
        text,
        pos: 0,
        depth: 0,
        max_depth: config.max_depth,
    };
    let root = reader.element()?;
    reader.skip_ws();
    if reader.pos < text.len() {
        return Err(NotationError::TrailingInput { offset: reader.pos });
    }
    Ok(ZipTree::new(root))
}

struct Reader<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Reader<'a> {
    fn skip_ws(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Result<char, NotationError> {
        self.skip_ws();
        self.text[self.pos..]
            .chars()
            .next()
            .ok_or(NotationError::UnexpectedEnd)
    }

    fn expect(&mut self, ch: char, expected: &'static str) -> Result<(), NotationError> {
        let found = self.peek()?;
        if found != ch {
            return Err(NotationError::Expected {
                expected,
                offset: self.pos,
                found,
            });
        }
        self.pos += ch.len_utf8();
        Ok(())
    }

    /// Consume `ch` if it is next.
    fn accept(&mut self, ch: char) -> Result<bool, NotationError> {
        if self.peek()? == ch {
            self.pos += ch.len_utf8();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn enter(&mut self) -> Result<(), NotationError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(NotationError::TooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn element(&mut self) -> Result<Element<String>, NotationError> {
        match self.peek()? {
            '[' => Ok(Element::Chain(self.chain()?)),
            '(' => Ok(Element::Snarl(self.snarl()?)),
            _ => Ok(Element::Seed(self.seed()?)),
        }
    }

    fn chain(&mut self) -> Result<Chain<String>, NotationError> {
        self.enter()?;
        self.expect('[', "'['")?;
        let mut elements = vec![self.element()?];
        let mut gaps = Vec::new();
        loop {
            if self.accept(']')? {
                break;
            }
            self.expect(',', "',' or ']'")?;
            if self.accept(']')? {
                break;
            }
            gaps.push(self.distance()?);
            self.expect(',', "','")?;
            elements.push(self.element()?);
        }
        self.depth -= 1;
        Ok(Chain::new(elements, gaps)?)
    }

    fn snarl(&mut self) -> Result<Snarl<String>, NotationError> {
        self.enter()?;
        self.expect('(', "'('")?;
        let mut entries = Vec::new();
        let boundary = loop {
            self.expect('(', "'(' opening a chain entry or boundary record")?;
            let mut distances = Vec::new();
            let chain = loop {
                match self.peek()? {
                    ')' => {
                        self.pos += 1;
                        break None;
                    }
                    '[' => {
                        let chain = self.chain()?;
                        self.accept(',')?;
                        self.expect(')', "')' closing a chain entry")?;
                        break Some(chain);
                    }
                    _ => {
                        distances.push(self.distance()?);
                        if !self.accept(',')? {
                            self.expect(')', "',' or ')'")?;
                            break None;
                        }
                    }
                }
            };
            match chain {
                Some(chain) => {
                    entries.push(ChainEntry::new(distances, chain));
                    self.expect(',', "',' after a chain entry")?;
                }
                None => break distances,
            }
        };
        self.accept(',')?;
        self.expect(')', "')' closing a snarl")?;
        self.depth -= 1;
        Ok(Snarl::new(entries, boundary)?)
    }

    fn token(&mut self) -> (usize, &'a str) {
        self.skip_ws();
        let start = self.pos;
        let text: &'a str = self.text;
        let rest = &text[start..];
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '-' | '+')))
            .unwrap_or(rest.len());
        self.pos += len;
        (start, &rest[..len])
    }

    fn distance(&mut self) -> Result<Distance, NotationError> {
        let (offset, text) = self.token();
        if text == "inf" {
            return Ok(UNREACHABLE);
        }
        text.parse::<Distance>()
            .map_err(|_| NotationError::InvalidDistance {
                text: text.to_string(),
                offset,
            })
    }

    fn seed(&mut self) -> Result<String, NotationError> {
        let quote = self.peek()?;
        if quote == '"' || quote == '\'' {
            let start = self.pos + 1;
            let end = self.text[start..]
                .find(quote)
                .map(|len| start + len)
                .ok_or(NotationError::UnexpectedEnd)?;
            self.pos = end + 1;
            return Ok(self.text[start..end].to_string());
        }

        let (offset, text) = self.token();
        if text.is_empty() {
            return Err(NotationError::Expected {
                expected: "seed, chain or snarl",
                offset,
                found: quote,
            });
        }
        Ok(text.to_string())
    }
}
