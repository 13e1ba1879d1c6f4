//! Instruction set shared by the compiler, the VM and the bytecode listing.

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Stop and return the output.
    Halt = 0x00,
    /// `JUMP hi lo`
    Jump = 0x01,
    /// `PUT <1-4 UTF-8 bytes>`
    Put = 0x02,
    /// `PICK hi lo` – operand addresses a pick table.
    Pick = 0x03,
    /// `CALL hi lo`
    Call = 0x04,
    /// Return from a subroutine.
    Ret = 0x05,
}

impl Opcode {
    /// Index == opcode byte.
    pub const VARIANT_NAMES: &'static [&'static str] =
        &["HALT", "JUMP", "PUT", "PICK", "CALL", "RET"];

    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x00 => Opcode::Halt,
            0x01 => Opcode::Jump,
            0x02 => Opcode::Put,
            0x03 => Opcode::Pick,
            0x04 => Opcode::Call,
            0x05 => Opcode::Ret,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        Self::VARIANT_NAMES[self as usize]
    }
}
