// Class-file decoding.
// Reads just enough of the JVM class format to recover class references from the
// constant pool and the invocation instructions of every method body.

use super::bytecode::decode_instructions;
use crate::domain::classfile::{ConstantEntry, DecodedClass, MethodInfo};
use thiserror::Error;

const MAGIC: u32 = 0xCAFE_BABE;
const ACC_NATIVE: u16 = 0x0100;
const ACC_ABSTRACT: u16 = 0x0400;
const CODE_ATTRIBUTE: &str = "Code";

const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_INTERFACE_METHODREF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;
const TAG_METHOD_HANDLE: u8 = 15;
const TAG_METHOD_TYPE: u8 = 16;
const TAG_DYNAMIC: u8 = 17;
const TAG_INVOKE_DYNAMIC: u8 = 18;
const TAG_MODULE: u8 = 19;
const TAG_PACKAGE: u8 = 20;

/// Why a class file could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of data at offset {0}")]
    Truncated(usize),
    #[error("not a class file (magic {0:#010x})")]
    BadMagic(u32),
    #[error("unknown constant pool tag {tag} at index {index}")]
    UnknownTag { tag: u8, index: u16 },
    #[error("constant pool index {0} is invalid or of the wrong kind")]
    BadConstant(u16),
    #[error("unknown opcode {opcode:#04x} at pc {pc}")]
    UnknownOpcode { opcode: u8, pc: usize },
    #[error("malformed switch at pc {0}")]
    BadSwitch(usize),
}

/// Big-endian cursor over a byte slice.
pub(super) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(super) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(super) fn bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(DecodeError::Truncated(self.pos))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(super) fn u1(&mut self) -> Result<u8, DecodeError> {
        Ok(self.bytes(1)?[0])
    }

    pub(super) fn u2(&mut self) -> Result<u16, DecodeError> {
        let b = self.bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub(super) fn u4(&mut self) -> Result<u32, DecodeError> {
        let b = self.bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.bytes(len).map(|_| ())
    }
}

#[derive(Debug, Clone)]
enum Constant {
    /// Index 0 and the slot after a Long/Double.
    Unusable,
    Utf8(String),
    Class { name: u16 },
    NameAndType { name: u16 },
    MemberRef { tag: u8, class: u16, name_and_type: u16 },
    Other(u8),
}

/// Decoded constant pool with resolution helpers.
pub(super) struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let count = reader.u2()? as usize;
        let mut entries = Vec::with_capacity(count);
        entries.push(Constant::Unusable);

        let mut index = 1;
        while index < count {
            let tag = reader.u1()?;
            let entry = match tag {
                TAG_UTF8 => {
                    let len = reader.u2()? as usize;
                    Constant::Utf8(String::from_utf8_lossy(reader.bytes(len)?).into_owned())
                }
                TAG_CLASS => Constant::Class { name: reader.u2()? },
                TAG_NAME_AND_TYPE => {
                    let name = reader.u2()?;
                    reader.u2()?;
                    Constant::NameAndType { name }
                }
                TAG_FIELDREF | TAG_METHODREF | TAG_INTERFACE_METHODREF => Constant::MemberRef {
                    tag,
                    class: reader.u2()?,
                    name_and_type: reader.u2()?,
                },
                TAG_INTEGER | TAG_FLOAT | TAG_DYNAMIC | TAG_INVOKE_DYNAMIC => {
                    reader.skip(4)?;
                    Constant::Other(tag)
                }
                TAG_LONG | TAG_DOUBLE => {
                    reader.skip(8)?;
                    Constant::Other(tag)
                }
                TAG_STRING | TAG_METHOD_TYPE | TAG_MODULE | TAG_PACKAGE => {
                    reader.skip(2)?;
                    Constant::Other(tag)
                }
                TAG_METHOD_HANDLE => {
                    reader.skip(3)?;
                    Constant::Other(tag)
                }
                _ => {
                    return Err(DecodeError::UnknownTag {
                        tag,
                        index: index as u16,
                    });
                }
            };
            entries.push(entry);
            index += 1;

            // Long and Double occupy two slots, both inside the pool
            if matches!(tag, TAG_LONG | TAG_DOUBLE) {
                if index >= count {
                    return Err(DecodeError::BadConstant((index - 1) as u16));
                }
                entries.push(Constant::Unusable);
                index += 1;
            }
        }
        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant, DecodeError> {
        self.entries
            .get(index as usize)
            .ok_or(DecodeError::BadConstant(index))
    }

    fn utf8(&self, index: u16) -> Result<&str, DecodeError> {
        match self.get(index)? {
            Constant::Utf8(s) => Ok(s),
            _ => Err(DecodeError::BadConstant(index)),
        }
    }

    /// Dotted name of a `CONSTANT_Class` entry.
    pub(super) fn class_name(&self, index: u16) -> Result<String, DecodeError> {
        match self.get(index)? {
            Constant::Class { name } => Ok(self.utf8(*name)?.replace('/', ".")),
            _ => Err(DecodeError::BadConstant(index)),
        }
    }

    /// `(owner, method name)` of a Methodref or InterfaceMethodref entry.
    pub(super) fn member_ref(&self, index: u16) -> Result<(String, String), DecodeError> {
        match self.get(index)? {
            Constant::MemberRef {
                class,
                name_and_type,
                ..
            } => {
                let owner = self.class_name(*class)?;
                let name = match self.get(*name_and_type)? {
                    Constant::NameAndType { name } => self.utf8(*name)?.to_string(),
                    _ => return Err(DecodeError::BadConstant(*name_and_type)),
                };
                Ok((owner, name))
            }
            _ => Err(DecodeError::BadConstant(index)),
        }
    }

    fn to_entries(&self) -> Result<Vec<ConstantEntry>, DecodeError> {
        let mut out = Vec::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            match entry {
                Constant::Unusable => {}
                Constant::Class { .. } => {
                    out.push(ConstantEntry::Class(self.class_name(index as u16)?))
                }
                Constant::Utf8(_) => out.push(ConstantEntry::Other(TAG_UTF8)),
                Constant::NameAndType { .. } => out.push(ConstantEntry::Other(TAG_NAME_AND_TYPE)),
                Constant::MemberRef { tag, .. } => out.push(ConstantEntry::Other(*tag)),
                Constant::Other(tag) => out.push(ConstantEntry::Other(*tag)),
            }
        }
        Ok(out)
    }
}

/// Decode one class file.
pub fn parse_class(data: &[u8]) -> Result<DecodedClass, DecodeError> {
    let mut reader = Reader::new(data);

    let magic = reader.u4()?;
    if magic != MAGIC {
        return Err(DecodeError::BadMagic(magic));
    }
    reader.u2()?; // minor
    reader.u2()?; // major

    let pool = ConstantPool::read(&mut reader)?;

    reader.u2()?; // access flags
    let name = pool.class_name(reader.u2()?)?;
    reader.u2()?; // super class
    let interfaces = reader.u2()? as usize;
    reader.skip(interfaces * 2)?;

    let fields = reader.u2()?;
    for _ in 0..fields {
        reader.skip(6)?;
        skip_attributes(&mut reader)?;
    }

    let method_count = reader.u2()?;
    let mut methods = Vec::with_capacity(method_count as usize);
    for _ in 0..method_count {
        methods.push(read_method(&mut reader, &pool)?);
    }

    Ok(DecodedClass {
        name,
        constant_pool: pool.to_entries()?,
        methods,
    })
}

fn read_method(reader: &mut Reader<'_>, pool: &ConstantPool) -> Result<MethodInfo, DecodeError> {
    let access = reader.u2()?;
    let name = pool.utf8(reader.u2()?)?.to_string();
    reader.u2()?; // descriptor

    let mut instructions = Vec::new();
    let attributes = reader.u2()?;
    for _ in 0..attributes {
        let attr_name = reader.u2()?;
        let len = reader.u4()? as usize;
        let body = reader.bytes(len)?;
        if pool.utf8(attr_name)? == CODE_ATTRIBUTE {
            let mut code_reader = Reader::new(body);
            code_reader.skip(4)?; // max_stack, max_locals
            let code_len = code_reader.u4()? as usize;
            instructions = decode_instructions(code_reader.bytes(code_len)?, pool)?;
        }
    }

    Ok(MethodInfo {
        name,
        is_abstract: access & ACC_ABSTRACT != 0,
        is_native: access & ACC_NATIVE != 0,
        instructions,
    })
}

fn skip_attributes(reader: &mut Reader<'_>) -> Result<(), DecodeError> {
    let count = reader.u2()?;
    for _ in 0..count {
        reader.u2()?;
        let len = reader.u4()? as usize;
        reader.skip(len)?;
    }
    Ok(())
}
