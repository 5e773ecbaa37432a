//! Test fixture generators for integration tests.
#![allow(dead_code)]

use calltrack::domain::classfile::{
    ConstantEntry, DecodedClass, Instruction, InvokeKind, MethodInfo,
};
use super::class_bytes::ClassBytes;

/// Decoded class referencing `refs` from its constant pool. The class's own
/// name is in the pool too, as a compiler would put it.
pub fn class(name: &str, refs: &[&str]) -> DecodedClass {
    let mut constant_pool = vec![ConstantEntry::Other(1), ConstantEntry::Class(name.to_string())];
    constant_pool.extend(refs.iter().map(|r| ConstantEntry::Class(r.to_string())));
    DecodedClass {
        name: name.to_string(),
        constant_pool,
        methods: Vec::new(),
    }
}

/// Concrete method whose body invokes `calls` as `(owner, method)` pairs.
pub fn method(name: &str, calls: &[(&str, &str)]) -> MethodInfo {
    let mut instructions = vec![Instruction::Other(0x2a)];
    instructions.extend(calls.iter().map(|(owner, method)| Instruction::Invoke {
        kind: InvokeKind::Virtual,
        owner: owner.to_string(),
        method: method.to_string(),
    }));
    instructions.push(Instruction::Other(0xb1));
    MethodInfo {
        name: name.to_string(),
        is_abstract: false,
        is_native: false,
        instructions,
    }
}

pub fn with_methods(mut class: DecodedClass, methods: Vec<MethodInfo>) -> DecodedClass {
    class.methods = methods;
    class
}

/// Class file for `this_class` (slash form, e.g. `com/acme/Order`) whose methods
/// call each `(owner, method)` pair with `invokevirtual`.
pub fn class_file(this_class: &str, methods: &[(&str, &[(&str, &str)])]) -> Vec<u8> {
    let mut bytes = ClassBytes::new(this_class);
    for (name, calls) in methods {
        let mut body = vec![0x2a]; // aload_0
        for (owner, method) in *calls {
            let index = bytes.method_ref(owner, method, "()V");
            body.push(0xb6);
            body.extend(index.to_be_bytes());
        }
        body.push(0xb1); // return
        bytes.method(0x0001, name, Some(body));
    }
    bytes.build()
}
