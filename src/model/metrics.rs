use crate::error::MappingDefect;

use super::types::FamilyKind;

/// A single sample: metric name, ordered labels and a numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    /// Bare family name (e.g. "isens_value")
    pub name: &'static str,
    /// Labels in exposition order
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

impl MetricRecord {
    pub fn new(kind: FamilyKind, value: f64) -> Self {
        Self {
            name: kind.name(),
            labels: Vec::new(),
            value,
        }
    }

    /// Appends a label, keeping insertion order.
    pub fn label(mut self, key: &'static str, value: impl ToString) -> Self {
        self.labels.push((key, value.to_string()));
        self
    }

    #[cfg(test)]
    pub fn label_value(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// All records of one family from a single snapshot. May be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub kind: FamilyKind,
    pub records: Vec<MetricRecord>,
}

impl MetricFamily {
    pub fn new(kind: FamilyKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }
}

/// Output of one collection cycle: every family, in order, plus any
/// per-record mapping defects that were defaulted along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    pub families: Vec<MetricFamily>,
    pub defects: Vec<MappingDefect>,
}

impl MetricSet {
    #[cfg(test)]
    pub fn family(&self, kind: FamilyKind) -> Option<&MetricFamily> {
        self.families.iter().find(|family| family.kind == kind)
    }

    pub fn record_count(&self) -> usize {
        self.records().count()
    }

    pub fn records(&self) -> impl Iterator<Item = &MetricRecord> {
        self.families.iter().flat_map(|family| family.records.iter())
    }
}
