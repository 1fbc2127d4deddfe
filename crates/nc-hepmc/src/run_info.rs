//! Run-level metadata parsed from the header block of an event listing.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::event::{attr_parse, checked_attr_parse};

/// Run-level metadata: weight-channel names and run attributes.
///
/// Read once per opened file; immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct RunInfo {
    /// Declared weight-channel names, in file order.
    pub weight_names: Vec<String>,
    /// Tool descriptions (`T` records), kept for diagnostics.
    pub tools: Vec<String>,
    /// Run-scope attributes as raw strings.
    pub attributes: BTreeMap<String, String>,
}

impl RunInfo {
    /// Optional attribute as a raw string.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Optional attribute parsed as `f64`.
    pub fn attribute_f64(&self, name: &str) -> Result<Option<f64>> {
        attr_parse(&self.attributes, name)
    }

    /// Required attribute parsed as `f64`; failure lists every attribute
    /// present.
    pub fn checked_attribute_f64(&self, name: &str) -> Result<f64> {
        checked_attr_parse(&self.attributes, name)
    }

    /// A vector-of-strings attribute, stored space-separated.
    ///
    /// Returns an empty vector when the attribute is absent.
    pub fn vector_string_attribute(&self, name: &str) -> Vec<String> {
        match self.attributes.get(name) {
            None => Vec::new(),
            Some(raw) => raw.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Required vector-of-strings attribute; failure lists every attribute
    /// present.
    pub fn checked_vector_string_attribute(&self, name: &str) -> Result<Vec<String>> {
        match self.attributes.get(name) {
            Some(raw) => Ok(raw.split_whitespace().map(str::to_string).collect()),
            None => Err(crate::error::HepmcError::MissingAttribute {
                name: name.to_string(),
                present: self.attributes.keys().cloned().collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_string_attribute_splits() {
        let mut ri = RunInfo::default();
        ri.attributes.insert("NuHepMC.Conventions".into(), "G.C.2 G.C.4 E.C.5".into());
        assert_eq!(
            ri.vector_string_attribute("NuHepMC.Conventions"),
            vec!["G.C.2", "G.C.4", "E.C.5"]
        );
        assert!(ri.vector_string_attribute("Absent").is_empty());
    }
}
