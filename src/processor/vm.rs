//! Interpreter for compiled pattern bytecode.
//!
//! `run` never fails. Unknown opcodes, out-of-bounds reads, an exhausted or
//! empty call stack all stop execution and hand back whatever was written so
//! far.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::trace;

use super::codec::{decode_short, decode_utf8};
use super::opcode::Opcode;

/// Maximum number of pending return offsets.
pub const MAX_CALL_DEPTH: usize = 256;

/// Source of the uniform draws made by `PICK`.
pub trait RandomSource {
    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn between(&mut self, low: usize, high: usize) -> usize;
}

impl RandomSource for StdRng {
    fn between(&mut self, low: usize, high: usize) -> usize {
        self.gen_range(low..=high)
    }
}

pub struct Vm<R> {
    rng: R,
}

impl Default for Vm<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: RandomSource> Vm<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Interpret `memory` from offset 0 and return the generated text.
    pub fn run(&mut self, memory: &[u8]) -> String {
        let mut state = State {
            memory,
            offset: 0,
            stack: Vec::new(),
            output: String::new(),
        };

        while state.step(&mut self.rng).is_some() {}

        trace!(offset = state.offset, depth = state.stack.len(), "halted");
        state.output
    }
}

struct State<'m> {
    memory: &'m [u8],
    offset: usize,
    stack: Vec<usize>,
    output: String,
}

impl State<'_> {
    /// Execute one instruction; `None` means stop.
    fn step<R: RandomSource>(&mut self, rng: &mut R) -> Option<()> {
        let byte = *self.memory.get(self.offset)?;
        self.offset += 1;

        match Opcode::from_byte(byte)? {
            Opcode::Halt => return None,
            Opcode::Jump => {
                self.offset = decode_short(self.memory, self.offset)? as usize;
            }
            Opcode::Put => {
                let (decoded, len) = decode_utf8(self.memory, self.offset)?;
                self.output.push_str(&decoded);
                self.offset += len;
            }
            Opcode::Pick => {
                let table = decode_short(self.memory, self.offset)? as usize;
                let count = decode_short(self.memory, table)? as usize;
                if count == 0 {
                    return None;
                }
                // entry 0 is the count itself
                let k = rng.between(1, count);
                self.offset = decode_short(self.memory, table + 2 * k)? as usize;
            }
            Opcode::Call => {
                let target = decode_short(self.memory, self.offset)? as usize;
                if self.stack.len() >= MAX_CALL_DEPTH {
                    trace!(target, "call stack exhausted");
                    return None;
                }
                self.stack.push(self.offset + 2);
                self.offset = target;
            }
            Opcode::Ret => {
                self.offset = self.stack.pop()?;
            }
        }
        Some(())
    }
}
