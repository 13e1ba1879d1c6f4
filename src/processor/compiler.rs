//! Two-phase assembler turning a pattern AST into VM bytecode.
//!
//! Emission writes instructions into a flat buffer, leaving zeroed operands
//! for targets that are not known yet and recording them in two link tables.
//! Linking then appends one subroutine per reachable reference and one pick
//! table per choice/maybe site, and patches every recorded operand.
//!
//! Resulting layout:
//!
//! ```text
//! [primary code][HALT][subroutine]...[subroutine][pick table]...[pick table]
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::debug;

use super::ast::{Ast, RefMap};
use super::codec::{encode_short, encode_utf8};
use super::opcode::Opcode;
use crate::error::CompileError;

/// Compile `ast` into bytecode, inlining a subroutine for every entry of
/// `refs` reachable from it.
pub fn compile(ast: &Ast, refs: &RefMap) -> Result<Vec<u8>, CompileError> {
    let mut c = Compiler::new(refs);
    c.emit(ast)?;
    c.push(&[Opcode::Halt as u8]);
    c.link_calls()?;
    c.link_picks()?;
    Ok(c.memory)
}

struct Compiler<'a> {
    memory: Vec<u8>,
    refs: &'a RefMap,
    /// CALL offset -> reference name.
    calls: BTreeMap<usize, char>,
    /// PICK offset -> start offsets of its alternatives.
    picks: BTreeMap<usize, Vec<usize>>,
}

impl<'a> Compiler<'a> {
    fn new(refs: &'a RefMap) -> Self {
        Self {
            memory: Vec::new(),
            refs,
            calls: BTreeMap::new(),
            picks: BTreeMap::new(),
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        self.memory.extend_from_slice(bytes);
    }

    /// Push `op` with a zeroed two-byte operand, returning the op's offset.
    fn push_placeholder(&mut self, op: Opcode) -> usize {
        let offset = self.memory.len();
        self.push(&[op as u8, 0, 0]);
        offset
    }

    /// Overwrite the operand of the instruction at `at` with `target`.
    fn patch(&mut self, at: usize, target: usize) -> Result<(), CompileError> {
        let [hi, lo] = encode_short(target)?;
        self.memory[at + 1] = hi;
        self.memory[at + 2] = lo;
        Ok(())
    }

    fn emit(&mut self, ast: &Ast) -> Result<(), CompileError> {
        if ast.is_empty() {
            return Err(CompileError::InvalidAst);
        }

        match ast {
            Ast::Pattern(children) => {
                for child in children {
                    self.emit(child)?;
                }
            }
            Ast::Atom(text) => {
                for c in text.chars() {
                    if self.refs.contains_key(&c) {
                        let at = self.push_placeholder(Opcode::Call);
                        self.calls.insert(at, c);
                    } else {
                        self.emit_put(c)?;
                    }
                }
            }
            Ast::Raw(text) => {
                for c in text.chars() {
                    self.emit_put(c)?;
                }
            }
            Ast::Choice(alternatives) => self.emit_choice(alternatives)?,
            Ast::Maybe(body) => {
                // Two-way pick: fall into the body, or land right after it.
                let pick = self.push_placeholder(Opcode::Pick);
                let enter = self.memory.len();
                self.emit(body)?;
                let skip = self.memory.len();
                self.picks.insert(pick, vec![enter, skip]);
            }
        }
        Ok(())
    }

    fn emit_put(&mut self, c: char) -> Result<(), CompileError> {
        let mut buf = [0u8; 4];
        let bytes = encode_utf8(c.encode_utf8(&mut buf))?;
        self.push(&[Opcode::Put as u8]);
        self.push(&bytes);
        Ok(())
    }

    fn emit_choice(&mut self, alternatives: &[Ast]) -> Result<(), CompileError> {
        let pick = self.push_placeholder(Opcode::Pick);

        let mut starts = Vec::with_capacity(alternatives.len());
        let mut jumps = Vec::with_capacity(alternatives.len() - 1);
        for (i, alternative) in alternatives.iter().enumerate() {
            starts.push(self.memory.len());
            self.emit(alternative)?;

            // the last alternative simply falls through
            if i != alternatives.len() - 1 {
                jumps.push(self.push_placeholder(Opcode::Jump));
            }
        }

        let end = self.memory.len();
        for at in jumps {
            self.patch(at, end)?;
        }

        self.picks.insert(pick, starts);
        Ok(())
    }

    /// Append a subroutine for every reference reached by a CALL, breadth
    /// first, then point each CALL at its subroutine.
    fn link_calls(&mut self) -> Result<(), CompileError> {
        if self.calls.is_empty() {
            return Ok(());
        }

        let refs = self.refs;
        let mut starts = HashMap::<char, usize>::new();
        let mut queue = VecDeque::<char>::new();
        let mut scanned = 0;

        loop {
            // queue names first reached by calls emitted since the last pass
            for (_, &name) in self.calls.range(scanned..) {
                if !starts.contains_key(&name) && !queue.contains(&name) {
                    queue.push_back(name);
                }
            }
            scanned = self.memory.len();

            let Some(name) = queue.pop_front() else {
                break;
            };
            let Some(body) = refs.get(&name) else {
                return Err(CompileError::InvalidAst);
            };

            debug!(reference = %name, offset = self.memory.len(), "emitting subroutine");
            starts.insert(name, self.memory.len());
            self.emit(body)?;
            self.push(&[Opcode::Ret as u8]);
        }

        let calls = std::mem::take(&mut self.calls);
        for (at, name) in calls {
            self.patch(at, starts[&name])?;
        }
        Ok(())
    }

    /// Append every pick table and point each PICK at its table.
    fn link_picks(&mut self) -> Result<(), CompileError> {
        let picks = std::mem::take(&mut self.picks);
        for (at, starts) in picks {
            let table = self.memory.len();
            debug!(pick = at, table, alternatives = starts.len(), "emitting pick table");
            self.patch(at, table)?;

            let len = encode_short(starts.len())?;
            self.push(&len);
            for start in starts {
                let start = encode_short(start)?;
                self.push(&start);
            }
        }
        Ok(())
    }
}
