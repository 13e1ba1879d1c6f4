//! Human-readable listing of compiled bytecode (`--bytecode`).

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::processor::codec::{decode_short, decode_utf8};
use crate::processor::opcode::Opcode;

/// One line per instruction, then one line per pick table.
pub fn listing(memory: &[u8]) -> String {
    let mut out = String::new();
    let mut tables = BTreeSet::<usize>::new();
    let mut offset = 0;

    while offset < memory.len() {
        if tables.contains(&offset) {
            offset = table_line(&mut out, memory, offset);
            continue;
        }

        let byte = memory[offset];
        let op = Opcode::from_byte(byte);
        let operand = match op {
            Some(Opcode::Jump | Opcode::Call | Opcode::Pick) => decode_short(memory, offset + 1)
                .map(|target| (format!("@{target:04x}"), 2, target as usize)),
            Some(Opcode::Put) => {
                decode_utf8(memory, offset + 1).map(|(c, len)| (format!("{c:?}"), len, 0))
            }
            _ => None,
        };

        match (op, operand) {
            (Some(op @ (Opcode::Halt | Opcode::Ret)), _) => {
                let _ = writeln!(out, "{offset:04x}  {}", op.name());
                offset += 1;
            }
            (Some(op), Some((text, len, target))) => {
                let _ = writeln!(out, "{offset:04x}  {:<4} {text}", op.name());
                if op == Opcode::Pick {
                    tables.insert(target);
                }
                offset += 1 + len;
            }
            _ => {
                let _ = writeln!(out, "{offset:04x}  .byte 0x{byte:02x}");
                offset += 1;
            }
        }
    }

    out
}

/// Render the pick table at `offset`, returning the offset after it.
fn table_line(out: &mut String, memory: &[u8], offset: usize) -> usize {
    let Some(count) = decode_short(memory, offset) else {
        let _ = writeln!(out, "{offset:04x}  .byte 0x{:02x}", memory[offset]);
        return offset + 1;
    };

    let entries: Vec<String> = (1..=count as usize)
        .map_while(|k| decode_short(memory, offset + 2 * k))
        .map(|e| format!("@{e:04x}"))
        .collect();
    let _ = writeln!(
        out,
        "{offset:04x}  .table {count} -> [{}]",
        entries.join(", ")
    );
    offset + 2 + 2 * entries.len()
}
