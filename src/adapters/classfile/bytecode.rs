// Bytecode walking.
// Every instruction is stepped over by length; only the four method-invocation
// opcodes are resolved against the constant pool.

use super::parser::{ConstantPool, DecodeError, Reader};
use crate::domain::classfile::{Instruction, InvokeKind};

const INVOKEVIRTUAL: u8 = 0xb6;
const INVOKESPECIAL: u8 = 0xb7;
const INVOKESTATIC: u8 = 0xb8;
const INVOKEINTERFACE: u8 = 0xb9;
const TABLESWITCH: u8 = 0xaa;
const LOOKUPSWITCH: u8 = 0xab;
const WIDE: u8 = 0xc4;
const IINC: u8 = 0x84;

/// Decode a `Code` attribute's bytecode into instructions.
pub(super) fn decode_instructions(
    code: &[u8],
    pool: &ConstantPool,
) -> Result<Vec<Instruction>, DecodeError> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    while pc < code.len() {
        let opcode = code[pc];
        let len = instruction_length(code, pc)?;
        if pc + len > code.len() {
            return Err(DecodeError::Truncated(pc));
        }

        let kind = match opcode {
            INVOKEVIRTUAL => Some(InvokeKind::Virtual),
            INVOKESPECIAL => Some(InvokeKind::Special),
            INVOKESTATIC => Some(InvokeKind::Static),
            INVOKEINTERFACE => Some(InvokeKind::Interface),
            _ => None,
        };
        let instruction = match kind {
            Some(kind) => {
                let index = u16::from_be_bytes([code[pc + 1], code[pc + 2]]);
                let (owner, method) = pool.member_ref(index)?;
                Instruction::Invoke {
                    kind,
                    owner,
                    method,
                }
            }
            None => Instruction::Other(opcode),
        };
        instructions.push(instruction);
        pc += len;
    }
    Ok(instructions)
}

/// Total length in bytes of the instruction at `pc`, operands included.
fn instruction_length(code: &[u8], pc: usize) -> Result<usize, DecodeError> {
    let opcode = code[pc];
    let len = match opcode {
        0x00..=0x0f => 1,
        0x10 => 2,
        0x11 => 3,
        0x12 => 2,
        0x13 | 0x14 => 3,
        0x15..=0x19 => 2,
        0x1a..=0x35 => 1,
        0x36..=0x3a => 2,
        0x3b..=0x83 => 1,
        IINC => 3,
        0x85..=0x98 => 1,
        0x99..=0xa8 => 3,
        0xa9 => 2,
        TABLESWITCH => return switch_length(code, pc, true),
        LOOKUPSWITCH => return switch_length(code, pc, false),
        0xac..=0xb1 => 1,
        0xb2..=0xb8 => 3,
        0xb9 | 0xba => 5,
        0xbb => 3,
        0xbc => 2,
        0xbd => 3,
        0xbe | 0xbf => 1,
        0xc0 | 0xc1 => 3,
        0xc2 | 0xc3 => 1,
        WIDE => match code.get(pc + 1) {
            Some(&IINC) => 6,
            Some(_) => 4,
            None => return Err(DecodeError::Truncated(pc)),
        },
        0xc5 => 4,
        0xc6 | 0xc7 => 3,
        0xc8 | 0xc9 => 5,
        0xca | 0xfe | 0xff => 1,
        _ => return Err(DecodeError::UnknownOpcode { opcode, pc }),
    };
    Ok(len)
}

/// `tableswitch` and `lookupswitch` pad their operands to a 4-byte boundary
/// measured from the start of the method's code.
fn switch_length(code: &[u8], pc: usize, table: bool) -> Result<usize, DecodeError> {
    let padding = (4 - (pc + 1) % 4) % 4;
    let operands = code.get(pc + 1 + padding..).ok_or(DecodeError::Truncated(pc))?;
    let mut reader = Reader::new(operands);
    reader.u4()?; // default offset

    let body = if table {
        let low = reader.u4()? as i32;
        let high = reader.u4()? as i32;
        if high < low {
            return Err(DecodeError::BadSwitch(pc));
        }
        let entries = (i64::from(high) - i64::from(low) + 1) as usize;
        12 + entries * 4
    } else {
        let pairs = reader.u4()? as i32;
        if pairs < 0 {
            return Err(DecodeError::BadSwitch(pc));
        }
        8 + pairs as usize * 8
    };
    Ok(1 + padding + body)
}
