//! The immutable multi-namespace symbol table.
//!
//! [`MappingTable`] owns every [`ClassEntry`] decoded from one artifact, plus one
//! name→class reverse index per namespace. Each class owns its method and field
//! [`MemberEntry`] collections and a per-namespace name index over them, so class
//! lookup is O(1) and member lookup touches only the owning class's candidates.
//!
//! Invariants, enforced at build time:
//! - every entry carries exactly one name per namespace ordinal (a total function;
//!   the name may repeat across namespaces)
//! - no two classes share a name within one namespace
//! - no two members of one class share a (name, descriptor) pair within one namespace
//!
//! After [`TableBuilder::finish`] the table is never mutated; it is `Send + Sync`
//! and safe for concurrent reads without locking.

use std::collections::HashMap;

use super::Namespaces;
use crate::Result;

/// Discriminates the two member kinds a class owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A method entry, identified by name plus method descriptor.
    Method,
    /// A field entry, identified by name plus field descriptor.
    Field,
}

impl MemberKind {
    fn noun(self) -> &'static str {
        match self {
            MemberKind::Method => "method",
            MemberKind::Field => "field",
        }
    }
}

/// One method or field across all namespaces. Owned exclusively by its class.
#[derive(Debug, Clone)]
pub struct MemberEntry {
    names: Vec<String>,
    descriptor: Option<String>,
}

impl MemberEntry {
    /// The member's name under the given namespace ordinal.
    #[must_use]
    pub fn name(&self, namespace: usize) -> Option<&str> {
        self.names.get(namespace).map(String::as_str)
    }

    /// The member's type descriptor, expressed in the table's first namespace
    /// (the descriptor's reference frame).
    #[must_use]
    pub fn descriptor(&self) -> Option<&str> {
        self.descriptor.as_deref()
    }
}

/// Per-namespace member name index: name → indices of candidate entries.
///
/// Overloads share a name and differ by descriptor, so each name maps to a small
/// candidate list that is disambiguated (or not) at query time.
#[derive(Debug, Clone, Default)]
struct MemberIndex {
    by_name: Vec<HashMap<String, Vec<usize>>>,
}

impl MemberIndex {
    fn new(namespace_count: usize) -> Self {
        MemberIndex {
            by_name: vec![HashMap::new(); namespace_count],
        }
    }

    fn insert(&mut self, entry_index: usize, entry: &MemberEntry, entries: &[MemberEntry]) -> std::result::Result<(), (usize, String)> {
        for (ordinal, name) in entry.names.iter().enumerate() {
            let candidates = self.by_name[ordinal].entry(name.clone()).or_default();
            for &existing in candidates.iter() {
                if entries[existing].descriptor == entry.descriptor {
                    return Err((ordinal, name.clone()));
                }
            }
            candidates.push(entry_index);
        }
        Ok(())
    }

    fn find(&self, namespace: usize, name: &str, descriptor: Option<&str>, entries: &[MemberEntry]) -> Option<usize> {
        let candidates = self.by_name.get(namespace)?.get(name)?;
        match descriptor {
            Some(descriptor) => candidates
                .iter()
                .copied()
                .find(|&index| entries[index].descriptor.as_deref() == Some(descriptor)),
            // No descriptor: the caller does not need overload disambiguation,
            // the first declared member with that name wins.
            None => candidates.first().copied(),
        }
    }
}

/// One class across all namespaces, with its owned members.
///
/// # Examples
///
/// ```rust
/// use mapscope::prelude::*;
///
/// let data = "tiny\t2\t0\tofficial\tnamed\n\
///             c\ta\tcom/example/Widget\n\
///             \tm\t(I)V\tb\tresize\n";
/// let table = decode(data.as_bytes())?;
/// let class = table.class(1, "com/example/Widget").unwrap();
/// let method = class.method(1, "resize", Some("(I)V")).unwrap();
/// assert_eq!(method.name(0), Some("b"));
/// # Ok::<(), mapscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClassEntry {
    names: Vec<String>,
    methods: Vec<MemberEntry>,
    fields: Vec<MemberEntry>,
    method_index: MemberIndex,
    field_index: MemberIndex,
}

impl ClassEntry {
    fn new(names: Vec<String>) -> Self {
        let namespace_count = names.len();
        ClassEntry {
            names,
            methods: Vec::new(),
            fields: Vec::new(),
            method_index: MemberIndex::new(namespace_count),
            field_index: MemberIndex::new(namespace_count),
        }
    }

    /// The class name under the given namespace ordinal (slash-separated path).
    #[must_use]
    pub fn name(&self, namespace: usize) -> Option<&str> {
        self.names.get(namespace).map(String::as_str)
    }

    /// All method entries, in artifact order.
    #[must_use]
    pub fn methods(&self) -> &[MemberEntry] {
        &self.methods
    }

    /// All field entries, in artifact order.
    #[must_use]
    pub fn fields(&self) -> &[MemberEntry] {
        &self.fields
    }

    /// Look up a method by its name under `namespace`, optionally disambiguated by
    /// descriptor. Without a descriptor the first declared method with that name is
    /// returned; with one, only an exact descriptor match.
    #[must_use]
    pub fn method(&self, namespace: usize, name: &str, descriptor: Option<&str>) -> Option<&MemberEntry> {
        self.method_index
            .find(namespace, name, descriptor, &self.methods)
            .map(|index| &self.methods[index])
    }

    /// Look up a field by its name under `namespace`. Same contract as [`Self::method`].
    #[must_use]
    pub fn field(&self, namespace: usize, name: &str, descriptor: Option<&str>) -> Option<&MemberEntry> {
        self.field_index
            .find(namespace, name, descriptor, &self.fields)
            .map(|index| &self.fields[index])
    }

    fn add_member(&mut self, kind: MemberKind, names: Vec<String>, descriptor: Option<String>) -> Result<()> {
        let entry = MemberEntry { names, descriptor };
        let (entries, index) = match kind {
            MemberKind::Method => (&mut self.methods, &mut self.method_index),
            MemberKind::Field => (&mut self.fields, &mut self.field_index),
        };
        if let Err((ordinal, name)) = index.insert(entries.len(), &entry, entries) {
            return Err(malformed_error!(
                "duplicate {} '{}' (descriptor {:?}) in class '{}' under namespace ordinal {}",
                kind.noun(),
                name,
                entry.descriptor,
                self.names[0],
                ordinal
            ));
        }
        entries.push(entry);
        Ok(())
    }
}

/// The immutable multi-namespace symbol table decoded from one mapping artifact.
///
/// Constructed once during resolver initialization, then queried for the lifetime
/// of the process. All lookups are pure reads; the table is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct MappingTable {
    namespaces: Namespaces,
    classes: Vec<ClassEntry>,
    by_name: Vec<HashMap<String, usize>>,
}

impl MappingTable {
    /// The namespace index declared by the artifact's header row.
    #[must_use]
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// All class entries, in artifact order.
    #[must_use]
    pub fn classes(&self) -> &[ClassEntry] {
        &self.classes
    }

    /// O(1) class lookup by name under the given namespace ordinal.
    #[must_use]
    pub fn class(&self, namespace: usize, name: &str) -> Option<&ClassEntry> {
        self.by_name
            .get(namespace)?
            .get(name)
            .map(|&index| &self.classes[index])
    }
}

/// Incremental table construction used by the decoder.
///
/// Rows arrive in artifact order; member rows attach to the most recently begun
/// class. Indices are maintained per insertion so duplicate entries are rejected
/// at the offending row.
#[derive(Debug)]
pub(crate) struct TableBuilder {
    namespaces: Namespaces,
    classes: Vec<ClassEntry>,
    by_name: Vec<HashMap<String, usize>>,
}

impl TableBuilder {
    pub(crate) fn new(namespaces: Namespaces) -> Self {
        let namespace_count = namespaces.len();
        TableBuilder {
            namespaces,
            classes: Vec::new(),
            by_name: vec![HashMap::new(); namespace_count],
        }
    }

    pub(crate) fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    pub(crate) fn has_classes(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Begin a new class; subsequent members attach to it.
    ///
    /// `names` must hold exactly one name per namespace (the decoder guarantees the
    /// count). Fails if any name is already taken within its namespace.
    pub(crate) fn begin_class(&mut self, names: Vec<String>) -> Result<()> {
        for (ordinal, name) in names.iter().enumerate() {
            if self.by_name[ordinal].contains_key(name) {
                return Err(malformed_error!(
                    "duplicate class '{}' in namespace '{}'",
                    name,
                    self.namespaces.label(ordinal).unwrap_or("?")
                ));
            }
        }

        let index = self.classes.len();
        for (ordinal, name) in names.iter().enumerate() {
            self.by_name[ordinal].insert(name.clone(), index);
        }
        self.classes.push(ClassEntry::new(names));
        Ok(())
    }

    /// Attach a member to the most recently begun class.
    pub(crate) fn add_member(&mut self, kind: MemberKind, names: Vec<String>, descriptor: Option<String>) -> Result<()> {
        match self.classes.last_mut() {
            Some(class) => class.add_member(kind, names, descriptor),
            None => Err(malformed_error!("{} row precedes any class row", kind.noun())),
        }
    }

    pub(crate) fn finish(self) -> MappingTable {
        MappingTable {
            namespaces: self.namespaces,
            classes: self.classes,
            by_name: self.by_name,
        }
    }
}
