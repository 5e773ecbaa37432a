//! Syntactic reference extraction from one decoded class.
//!
//! Two tuple sets come out of every class: class-level `(containing class,
//! referenced class)` pairs from the constant pool, and method-level
//! `(caller, callee)` pairs from invocation instructions. Tuples are values;
//! the caller unions them across classes and folds them into a graph.

use crate::domain::classfile::DecodedClass;
use crate::domain::filter::NameFilter;
use crate::domain::node::NodeId;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::debug;

const INSTANCE_INITIALIZER: &str = "<init>";
const STATIC_INITIALIZER: &str = "<clinit>";

/// Digit and `$` runs: synthetic and inner-class suffixes (`Order$1`, `lambda$run$0`).
fn synthetic_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[$\d]+").expect("synthetic suffix regex"))
}

/// Raw reference before graph insertion: `source` references (or calls) `target`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceTuple {
    pub source: NodeId,
    pub target: NodeId,
}

impl ReferenceTuple {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Deduplicated tuples, one set per granularity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedReferences {
    pub class_refs: BTreeSet<ReferenceTuple>,
    pub method_refs: BTreeSet<ReferenceTuple>,
}

impl ExtractedReferences {
    /// Set union with another extraction result.
    pub fn merge(&mut self, other: ExtractedReferences) {
        self.class_refs.extend(other.class_refs);
        self.method_refs.extend(other.method_refs);
    }

    pub fn is_empty(&self) -> bool {
        self.class_refs.is_empty() && self.method_refs.is_empty()
    }
}

/// Reference extractor
pub struct ReferenceExtractor {
    filter: NameFilter,
}

impl ReferenceExtractor {
    pub fn new(filter: NameFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &NameFilter {
        &self.filter
    }

    /// Extract both tuple sets from one class.
    pub fn extract(&self, class: &DecodedClass) -> ExtractedReferences {
        let refs = ExtractedReferences {
            class_refs: self.extract_class_refs(class),
            method_refs: self.extract_method_refs(class),
        };
        debug!(
            class = %class.name,
            class_refs = refs.class_refs.len(),
            method_refs = refs.method_refs.len(),
            "extracted references"
        );
        refs
    }

    fn extract_class_refs(&self, class: &DecodedClass) -> BTreeSet<ReferenceTuple> {
        let source = normalize_identifier(&class.name);
        class
            .class_references()
            .filter(|referenced| self.filter.accepts(referenced))
            .filter_map(|referenced| accept_tuple(source.clone(), normalize_identifier(referenced)))
            .collect()
    }

    fn extract_method_refs(&self, class: &DecodedClass) -> BTreeSet<ReferenceTuple> {
        let mut refs = BTreeSet::new();
        for method in class.methods.iter().filter(|m| m.has_body()) {
            if is_initializer(&method.name) {
                continue;
            }
            let caller = method_id(&class.name, &method.name);
            for (_, owner, invoked) in method.invocations() {
                if !self.filter.accepts(owner) || is_initializer(invoked) {
                    continue;
                }
                if let Some(tuple) = accept_tuple(caller.clone(), method_id(owner, invoked)) {
                    refs.insert(tuple);
                }
            }
        }
        refs
    }
}

/// Drops self-references and ids normalized away to nothing.
fn accept_tuple(source: NodeId, target: NodeId) -> Option<ReferenceTuple> {
    if source.is_empty() || target.is_empty() || source == target {
        return None;
    }
    Some(ReferenceTuple { source, target })
}

fn is_initializer(method: &str) -> bool {
    method == INSTANCE_INITIALIZER || method == STATIC_INITIALIZER
}

/// Normalize a raw type identifier into a node id.
///
/// Strips the array descriptor (`[[Lcom.acme.Order;` → `com.acme.Order`),
/// digit-and-`$` runs (`Order$Line2` → `OrderLine`) and initializer markers.
pub fn normalize_identifier(raw: &str) -> String {
    let mut id = raw;
    if id.starts_with('[') {
        id = id.trim_start_matches('[');
        if let Some(object) = id.strip_prefix('L') {
            id = object.strip_suffix(';').unwrap_or(object);
        }
    }
    let id = id
        .replace(INSTANCE_INITIALIZER, "")
        .replace(STATIC_INITIALIZER, "");
    synthetic_suffix_regex().replace_all(&id, "").into_owned()
}

/// Method-level node id: `<normalized type>:<normalized method>`.
pub fn method_id(owner: &str, method: &str) -> NodeId {
    let method = synthetic_suffix_regex().replace_all(method, "");
    format!("{}:{}", normalize_identifier(owner), method)
}
