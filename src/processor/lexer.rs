//! Character cursor the pattern parser is written against.
//
//  The pattern language has no tokens longer than one character, so the
//  cursor works directly on chars with a single character of lookahead:
//
//      Delimiters ::= '(' | ')' | '[' | ']' | '/' | '"'
//      Text       ::= maximal run of chars outside a caller-given stop set

use std::iter::Peekable;
use std::str::Chars;

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
        }
    }

    pub fn is_empty(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    pub fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// True if the next char is one of `set`.
    pub fn matches(&mut self, set: &[char]) -> bool {
        self.peek().is_some_and(|c| set.contains(&c))
    }

    /// Consume the next char if it is one of `set`.
    pub fn skip(&mut self, set: &[char]) -> bool {
        if self.matches(set) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Consume chars until end of input or until one of `stop` is next.
    /// Returns `None` when nothing was consumed.
    pub fn take_until(&mut self, stop: &[char]) -> Option<String> {
        let mut buf = String::new();
        while let Some(c) = self.peek() {
            if stop.contains(&c) {
                break;
            }
            buf.push(c);
            self.next_char();
        }
        (!buf.is_empty()).then_some(buf)
    }
}
