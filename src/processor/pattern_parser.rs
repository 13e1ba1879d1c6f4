//! Recursive-descent parser for pattern text.
//
//      pattern ::= group group*            (stops at ')' ']' or EOF)
//      group   ::= '(' pattern ')'         -> Maybe
//                | '[' pattern ']'         -> the inner pattern
//                | choice
//      choice  ::= atom ('/' atom)*
//      atom    ::= '"' text '"'            -> Raw
//                | text                    -> Atom

use super::ast::Ast;
use super::lexer::Lexer;
use crate::error::SyntaxError;

const ATOM_STOP: &[char] = &['[', ']', '(', ')', '"', '/'];
const RAW_STOP: &[char] = &['"'];

/// Deepest allowed `(`/`[` nesting; keeps parsing and compiling off the
/// bottom of the native stack.
pub const MAX_NESTING: usize = 256;

/// Parse one pattern into its AST.
pub fn parse(src: &str) -> Result<Ast, SyntaxError> {
    let mut p = Parser::new(src);
    let ast = p.parse_pattern()?;
    match p.lex.next_char() {
        None => Ok(ast),
        Some(c) => Err(unexpected(c)),
    }
}

fn unexpected(c: char) -> SyntaxError {
    SyntaxError::new(format!("unexpected \"{c}\""))
}

struct Parser<'a> {
    lex: Lexer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            lex: Lexer::new(src),
            depth: 0,
        }
    }

    fn parse_pattern(&mut self) -> Result<Ast, SyntaxError> {
        let mut groups = vec![self.parse_group()?];
        while !self.lex.is_empty() && !self.lex.matches(&[')', ']']) {
            groups.push(self.parse_group()?);
        }
        Ok(Ast::Pattern(groups))
    }

    fn parse_group(&mut self) -> Result<Ast, SyntaxError> {
        if self.lex.skip(&['(']) {
            let body = self.parse_nested()?;
            if !self.lex.skip(&[')']) {
                return Err(SyntaxError::new("unclosed parenthesis"));
            }
            Ok(Ast::Maybe(Box::new(body)))
        } else if self.lex.skip(&['[']) {
            let body = self.parse_nested()?;
            if !self.lex.skip(&[']']) {
                return Err(SyntaxError::new("unclosed brackets"));
            }
            Ok(body)
        } else {
            self.parse_choice()
        }
    }

    /// Parse the pattern inside a just-opened `(` or `[`.
    fn parse_nested(&mut self) -> Result<Ast, SyntaxError> {
        if self.depth == MAX_NESTING {
            return Err(SyntaxError::new("nesting too deep"));
        }
        self.depth += 1;
        let body = self.parse_pattern();
        self.depth -= 1;
        body
    }

    fn parse_choice(&mut self) -> Result<Ast, SyntaxError> {
        let mut atoms = vec![self.parse_atom()?];
        while self.lex.skip(&['/']) {
            atoms.push(self.parse_atom()?);
        }

        if atoms.len() == 1 {
            Ok(atoms.remove(0))
        } else {
            Ok(Ast::Choice(atoms))
        }
    }

    fn parse_atom(&mut self) -> Result<Ast, SyntaxError> {
        if self.lex.is_empty() {
            return Err(SyntaxError::new("unexpected end of input"));
        }

        if self.lex.skip(&['"']) {
            // A missing closing quote just reads to the end of input.
            let text = self.lex.take_until(RAW_STOP);
            self.lex.next_char();
            return text
                .map(Ast::Raw)
                .ok_or_else(|| SyntaxError::new("empty quotes"));
        }

        match self.lex.take_until(ATOM_STOP) {
            Some(text) => Ok(Ast::Atom(text)),
            None => match self.lex.next_char() {
                Some(c) => Err(unexpected(c)),
                None => Err(SyntaxError::new("unexpected end of input")),
            },
        }
    }
}
