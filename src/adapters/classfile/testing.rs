//! Minimal class-file writer for decoder tests.

use std::collections::HashMap;

pub(crate) struct ClassBytes {
    this_class: String,
    pool: Vec<u8>,
    next_index: u16,
    utf8_cache: HashMap<String, u16>,
    methods: Vec<u8>,
    method_count: u16,
}

impl ClassBytes {
    pub(crate) fn new(this_class: &str) -> Self {
        Self {
            this_class: this_class.to_string(),
            pool: Vec::new(),
            next_index: 1,
            utf8_cache: HashMap::new(),
            methods: Vec::new(),
            method_count: 0,
        }
    }

    fn entry(&mut self, bytes: &[u8], slots: u16) -> u16 {
        let index = self.next_index;
        self.pool.extend_from_slice(bytes);
        self.next_index += slots;
        index
    }

    pub(crate) fn utf8(&mut self, value: &str) -> u16 {
        if let Some(&index) = self.utf8_cache.get(value) {
            return index;
        }
        let mut bytes = vec![1];
        bytes.extend((value.len() as u16).to_be_bytes());
        bytes.extend(value.as_bytes());
        let index = self.entry(&bytes, 1);
        self.utf8_cache.insert(value.to_string(), index);
        index
    }

    pub(crate) fn class(&mut self, name: &str) -> u16 {
        let name = self.utf8(name);
        let mut bytes = vec![7];
        bytes.extend(name.to_be_bytes());
        self.entry(&bytes, 1)
    }

    pub(crate) fn long(&mut self, value: i64) -> u16 {
        let mut bytes = vec![5];
        bytes.extend(value.to_be_bytes());
        self.entry(&bytes, 2)
    }

    fn member_ref(&mut self, tag: u8, owner: &str, name: &str, descriptor: &str) -> u16 {
        let class = self.class(owner);
        let name = self.utf8(name);
        let descriptor = self.utf8(descriptor);
        let mut nat = vec![12];
        nat.extend(name.to_be_bytes());
        nat.extend(descriptor.to_be_bytes());
        let nat = self.entry(&nat, 1);
        let mut bytes = vec![tag];
        bytes.extend(class.to_be_bytes());
        bytes.extend(nat.to_be_bytes());
        self.entry(&bytes, 1)
    }

    pub(crate) fn method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(10, owner, name, descriptor)
    }

    pub(crate) fn interface_method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(11, owner, name, descriptor)
    }

    /// Add a method; `code` is the raw bytecode of its `Code` attribute, if any.
    pub(crate) fn method(&mut self, access: u16, name: &str, code: Option<Vec<u8>>) {
        let name = self.utf8(name);
        let descriptor = self.utf8("()V");
        self.methods.extend(access.to_be_bytes());
        self.methods.extend(name.to_be_bytes());
        self.methods.extend(descriptor.to_be_bytes());
        match code {
            Some(code) => {
                let attr_name = self.utf8("Code");
                self.methods.extend(1u16.to_be_bytes());
                self.methods.extend(attr_name.to_be_bytes());
                let len = 2 + 2 + 4 + code.len() + 2 + 2;
                self.methods.extend((len as u32).to_be_bytes());
                self.methods.extend(4u16.to_be_bytes()); // max_stack
                self.methods.extend(4u16.to_be_bytes()); // max_locals
                self.methods.extend((code.len() as u32).to_be_bytes());
                self.methods.extend(code);
                self.methods.extend(0u16.to_be_bytes()); // exception table
                self.methods.extend(0u16.to_be_bytes()); // attributes
            }
            None => self.methods.extend(0u16.to_be_bytes()),
        }
        self.method_count += 1;
    }

    pub(crate) fn build(mut self) -> Vec<u8> {
        let this_name = self.this_class.clone();
        let this_class = self.class(&this_name);

        let mut out = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52];
        out.extend(self.next_index.to_be_bytes());
        out.extend(&self.pool);
        out.extend(0x0021u16.to_be_bytes()); // access
        out.extend(this_class.to_be_bytes());
        out.extend(0u16.to_be_bytes()); // super
        out.extend(0u16.to_be_bytes()); // interfaces
        out.extend(0u16.to_be_bytes()); // fields
        out.extend(self.method_count.to_be_bytes());
        out.extend(&self.methods);
        out.extend(0u16.to_be_bytes()); // attributes
        out
    }
}

/// Concatenate instruction byte groups into a method body.
pub(crate) fn code(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}
