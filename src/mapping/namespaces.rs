//! Namespace labels and their table-assigned ordinals.
//!
//! A namespace is one complete naming scheme for all classes, methods, and fields in
//! a binary (e.g. `official`, `intermediary`, `named`). The artifact's header row
//! declares a fixed, ordered namespace list; ordinals are assigned positionally and
//! never change after construction. Queries address namespaces by label and are
//! translated to ordinals through this index.

use std::collections::HashMap;

use crate::{Error, Result};

/// The ordered set of naming schemes declared by one mapping table.
///
/// # Examples
///
/// ```rust
/// use mapscope::prelude::*;
///
/// let data = "tiny\t2\t0\tofficial\tnamed\nc\ta\tcom/example/Widget\n";
/// let table = decode(data.as_bytes())?;
/// assert_eq!(table.namespaces().ordinal("named")?, 1);
/// assert_eq!(table.namespaces().label(0), Some("official"));
/// # Ok::<(), mapscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Namespaces {
    labels: Vec<String>,
    ordinals: HashMap<String, usize>,
}

impl Namespaces {
    /// Build the index from the header-declared label order.
    ///
    /// ## Arguments
    /// * 'labels' - The namespace labels in header order
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the list is empty, a label is empty, or a
    /// label occurs twice.
    pub(crate) fn from_labels(labels: Vec<String>) -> Result<Namespaces> {
        if labels.is_empty() {
            return Err(malformed_error!("header declares no namespaces"));
        }

        let mut ordinals = HashMap::with_capacity(labels.len());
        for (ordinal, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(malformed_error!("namespace label at ordinal {} is empty", ordinal));
            }
            if ordinals.insert(label.clone(), ordinal).is_some() {
                return Err(malformed_error!("duplicate namespace '{}' in header", label));
            }
        }

        Ok(Namespaces { labels, ordinals })
    }

    /// The ordinal assigned to `label`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNamespace`] for labels absent from the header.
    pub fn ordinal(&self, label: &str) -> Result<usize> {
        self.ordinals
            .get(label)
            .copied()
            .ok_or_else(|| Error::UnknownNamespace(label.to_string()))
    }

    /// The label declared at `ordinal`, if any.
    #[must_use]
    pub fn label(&self, ordinal: usize) -> Option<&str> {
        self.labels.get(ordinal).map(String::as_str)
    }

    /// Number of declared namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// `true` if no namespaces are declared. Never the case for a constructed index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over the labels in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn ordinals_follow_header_order() {
        let ns = Namespaces::from_labels(labels(&["official", "intermediary", "named"])).unwrap();
        assert_eq!(ns.len(), 3);
        assert_eq!(ns.ordinal("official").unwrap(), 0);
        assert_eq!(ns.ordinal("intermediary").unwrap(), 1);
        assert_eq!(ns.ordinal("named").unwrap(), 2);
        assert_eq!(ns.label(2), Some("named"));
        assert_eq!(ns.label(3), None);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let ns = Namespaces::from_labels(labels(&["official", "named"])).unwrap();
        assert!(matches!(ns.ordinal("hashed"), Err(Error::UnknownNamespace(label)) if label == "hashed"));
    }

    #[test]
    fn duplicate_label_is_malformed() {
        let result = Namespaces::from_labels(labels(&["named", "official", "named"]));
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn empty_header_is_malformed() {
        assert!(matches!(Namespaces::from_labels(Vec::new()), Err(Error::Malformed { .. })));
        assert!(matches!(
            Namespaces::from_labels(labels(&["official", ""])),
            Err(Error::Malformed { .. })
        ));
    }
}
