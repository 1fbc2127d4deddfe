//! Public data types for one decoded generator event.

use std::collections::BTreeMap;

use crate::error::{HepmcError, Result};

/// A four-vector in the file's declared momentum unit, (px, py, pz, E).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FourVector {
    /// x momentum component.
    pub px: f64,
    /// y momentum component.
    pub py: f64,
    /// z momentum component.
    pub pz: f64,
    /// Total energy.
    pub e: f64,
}

impl FourVector {
    /// Three-momentum magnitude.
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Invariant mass; negative mass-squared from rounding clamps to zero.
    pub fn m(&self) -> f64 {
        let m2 = self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz;
        if m2 > 0.0 { m2.sqrt() } else { 0.0 }
    }
}

/// One particle record (`P` line).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Particle id within the event (1-based in the file).
    pub id: i32,
    /// PDG particle code.
    pub pid: i32,
    /// Generator status code.
    pub status: i32,
    /// Four-momentum.
    pub momentum: FourVector,
    /// Id of the production vertex (negative), a direct parent particle
    /// (positive), or 0 for beam particles.
    pub production_vertex: i32,
}

/// One vertex record (`V` line).
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Vertex id (negative in the file).
    pub id: i32,
    /// Generator vertex status code.
    pub status: i32,
}

/// Per-event cross-section estimate (`GenCrossSection` attribute).
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    /// Cross-section values, one per weight channel (at least one).
    pub values: Vec<f64>,
    /// Corresponding uncertainties.
    pub errors: Vec<f64>,
}

impl CrossSection {
    /// The first channel's cross-section value.
    pub fn value(&self) -> f64 {
        self.values[0]
    }
}

/// One decoded generator event.
///
/// Owned by the reader caller; the reader produces a fresh value per
/// `read_event` call.
#[derive(Debug, Clone, Default)]
pub struct GenEvent {
    /// Event sequence number from the `E` record.
    pub event_number: i64,
    /// Momentum unit declared by the `U` record (`GEV` or `MEV`).
    pub momentum_unit: String,
    /// Length unit declared by the `U` record (`MM` or `CM`).
    pub length_unit: String,
    /// Particle records in file order.
    pub particles: Vec<Particle>,
    /// Vertex records in file order.
    pub vertices: Vec<Vertex>,
    /// Event weights, ordered as the run-level weight-channel names.
    pub weights: Vec<f64>,
    /// Per-event cross-section estimate, when the generator wrote one.
    pub cross_section: Option<CrossSection>,
    /// Event-scope attributes (id 0) as raw strings.
    pub attributes: BTreeMap<String, String>,
}

impl GenEvent {
    /// Optional attribute as a raw string.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Optional attribute parsed as `i32`; absent attributes yield `Ok(None)`,
    /// unparseable ones an error.
    pub fn attribute_i32(&self, name: &str) -> Result<Option<i32>> {
        attr_parse(&self.attributes, name)
    }

    /// Required attribute parsed as `i32`.
    ///
    /// Fails with the attribute name and the full list of attributes present
    /// when absent.
    pub fn checked_attribute_i32(&self, name: &str) -> Result<i32> {
        checked_attr_parse(&self.attributes, name)
    }

    /// Vertex record with the given id, if present.
    pub fn vertex(&self, id: i32) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }
}

/// Optional typed attribute lookup shared by events and run info.
pub(crate) fn attr_parse<T: std::str::FromStr>(
    map: &BTreeMap<String, String>,
    name: &str,
) -> Result<Option<T>> {
    match map.get(name) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| HepmcError::AttributeType {
            name: name.to_string(),
            value: raw.clone(),
        }),
    }
}

/// Required typed attribute lookup; lists every attribute present on failure.
pub(crate) fn checked_attr_parse<T: std::str::FromStr>(
    map: &BTreeMap<String, String>,
    name: &str,
) -> Result<T> {
    match attr_parse(map, name)? {
        Some(v) => Ok(v),
        None => Err(HepmcError::MissingAttribute {
            name: name.to_string(),
            present: map.keys().cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_attribute_lists_known_names() {
        let mut ev = GenEvent::default();
        ev.attributes.insert("Alpha".into(), "1".into());
        ev.attributes.insert("Beta".into(), "2".into());

        let err = ev.checked_attribute_i32("ProcID").unwrap_err();
        match err {
            HepmcError::MissingAttribute { name, present } => {
                assert_eq!(name, "ProcID");
                assert_eq!(present, vec!["Alpha".to_string(), "Beta".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparseable_attribute_is_a_type_error() {
        let mut ev = GenEvent::default();
        ev.attributes.insert("ProcID".into(), "soft".into());
        assert!(matches!(
            ev.attribute_i32("ProcID"),
            Err(HepmcError::AttributeType { .. })
        ));
    }
}
