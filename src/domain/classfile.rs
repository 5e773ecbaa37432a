//! Decoded class representation: contract between a class-file decoder and the
//! reference extractor.
//!
//! Only the parts extraction looks at are modelled. Constant-pool entries other
//! than class references and instructions other than invocations are kept as
//! opaque markers so that positions and counts stay meaningful for diagnostics.

/// One decoded class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedClass {
    /// Fully qualified, dot-separated class name (`com.acme.Order`, `com.acme.Order$1`).
    pub name: String,
    /// Constant-pool entries in pool order.
    pub constant_pool: Vec<ConstantEntry>,
    pub methods: Vec<MethodInfo>,
}

/// Constant-pool entry, reduced to what extraction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantEntry {
    /// `CONSTANT_Class`, resolved to its dotted name. Array classes keep their
    /// descriptor form, e.g. `[Lcom.acme.Order;` or `[I`.
    Class(String),
    /// Any other tag.
    Other(u8),
}

/// One method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub is_abstract: bool,
    pub is_native: bool,
    /// Decoded instruction stream; empty when the method carries no code.
    pub instructions: Vec<Instruction>,
}

/// Invocation flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvokeKind {
    Virtual,
    Special,
    Static,
    Interface,
}

/// Decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Invoke {
        kind: InvokeKind,
        /// Type that declares the invoked method, dotted.
        owner: String,
        method: String,
    },
    /// Any non-invocation opcode.
    Other(u8),
}

impl DecodedClass {
    /// Names of all class-type constant-pool entries, in pool order.
    pub fn class_references(&self) -> impl Iterator<Item = &str> {
        self.constant_pool.iter().filter_map(|entry| match entry {
            ConstantEntry::Class(name) => Some(name.as_str()),
            ConstantEntry::Other(_) => None,
        })
    }
}

impl MethodInfo {
    /// Methods without a body contribute nothing to the method-level graph.
    pub fn has_body(&self) -> bool {
        !self.is_abstract && !self.is_native
    }

    /// `(kind, owner, method)` of every invocation, in instruction order.
    pub fn invocations(&self) -> impl Iterator<Item = (InvokeKind, &str, &str)> {
        self.instructions.iter().filter_map(|ins| match ins {
            Instruction::Invoke {
                kind,
                owner,
                method,
            } => Some((*kind, owner.as_str(), method.as_str())),
            Instruction::Other(_) => None,
        })
    }
}
