//! Pattern AST as produced by the parser and consumed by the compiler.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Sequential concatenation of one or more groups.
    Pattern(Vec<Ast>),

    /// Literal characters; any of them may name a reference.
    Atom(String),

    /// Quoted characters, never resolved as references.
    Raw(String),

    /// Exactly one alternative is picked at run time.
    Choice(Vec<Ast>),

    /// `(body)` – body included or skipped with equal odds.
    Maybe(Box<Ast>),
}

impl Ast {
    /// True for nodes the compiler refuses: empty sequences, empty text and
    /// choices with fewer than two alternatives.
    pub fn is_empty(&self) -> bool {
        match self {
            Ast::Pattern(children) => children.is_empty(),
            Ast::Atom(text) | Ast::Raw(text) => text.is_empty(),
            Ast::Choice(alternatives) => alternatives.len() < 2,
            Ast::Maybe(_) => false,
        }
    }
}

/// Single-character reference name -> parsed definition.
pub type RefMap = BTreeMap<char, Ast>;
