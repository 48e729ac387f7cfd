//! Run counters for the export pipelines.
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder every call is a no-op.

use std::fmt;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Ingest
    IngestRowsLoaded,

    // Unify (pipeline A)
    UnifyDuplicatesDropped,
    UnifyUnitsMatched,

    // Specialties (pipeline B)
    SpecialtiesPayloadsSkipped,
    SpecialtiesFactsEmitted,
    SpecialtiesFactsDeduplicated,
    SpecialtiesLabelsCanonicalized,

    // Export
    ExportRowsWritten,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::IngestRowsLoaded => "clinicas_ingest_rows_loaded_total",
            MetricName::UnifyDuplicatesDropped => "clinicas_unify_duplicates_dropped_total",
            MetricName::UnifyUnitsMatched => "clinicas_unify_units_matched_total",
            MetricName::SpecialtiesPayloadsSkipped => "clinicas_specialties_payloads_skipped_total",
            MetricName::SpecialtiesFactsEmitted => "clinicas_specialties_facts_emitted_total",
            MetricName::SpecialtiesFactsDeduplicated => "clinicas_specialties_facts_deduplicated_total",
            MetricName::SpecialtiesLabelsCanonicalized => "clinicas_specialties_labels_canonicalized_total",
            MetricName::ExportRowsWritten => "clinicas_export_rows_written_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            IngestRowsLoaded,
            UnifyDuplicatesDropped,
            UnifyUnitsMatched,
            SpecialtiesPayloadsSkipped,
            SpecialtiesFactsEmitted,
            SpecialtiesFactsDeduplicated,
            SpecialtiesLabelsCanonicalized,
            ExportRowsWritten,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod ingest {
    use super::MetricName;

    pub fn rows_loaded(source: &str, rows: usize) {
        ::metrics::counter!(MetricName::IngestRowsLoaded.as_str(), "source" => source.to_string())
            .increment(rows as u64);
    }
}

pub mod unify {
    use super::MetricName;

    pub fn duplicates_dropped(table: &str, count: usize) {
        ::metrics::counter!(MetricName::UnifyDuplicatesDropped.as_str(), "table" => table.to_string())
            .increment(count as u64);
    }

    pub fn units_matched(count: usize) {
        ::metrics::counter!(MetricName::UnifyUnitsMatched.as_str()).increment(count as u64);
    }
}

pub mod specialties {
    use super::MetricName;

    pub fn payload_skipped() {
        ::metrics::counter!(MetricName::SpecialtiesPayloadsSkipped.as_str()).increment(1);
    }

    pub fn facts_emitted(count: usize) {
        ::metrics::counter!(MetricName::SpecialtiesFactsEmitted.as_str()).increment(count as u64);
    }

    pub fn facts_deduplicated(count: usize) {
        ::metrics::counter!(MetricName::SpecialtiesFactsDeduplicated.as_str()).increment(count as u64);
    }

    pub fn labels_canonicalized(count: usize) {
        ::metrics::counter!(MetricName::SpecialtiesLabelsCanonicalized.as_str()).increment(count as u64);
    }
}

pub mod export {
    use super::MetricName;

    pub fn rows_written(file: &str, rows: usize) {
        ::metrics::counter!(MetricName::ExportRowsWritten.as_str(), "file" => file.to_string())
            .increment(rows as u64);
    }
}
