//! Statistics for conversion operations

use serde::Serialize;
use std::time::Duration;

use crate::conversion::Format;
use crate::record::RecordSet;

/// Metadata about a single conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionMetadata {
    pub source: Format,
    pub target: Format,
    /// Records read from the source
    pub record_count: usize,
    /// Distinct field names across all records
    pub field_count: usize,
    pub input_size: u64,
    pub output_size: u64,
    pub processing_time_ms: u64,
}

impl ConversionMetadata {
    pub fn new(
        source: Format,
        target: Format,
        records: &RecordSet,
        input_size: usize,
        output_size: usize,
        processing_time: Duration,
    ) -> Self {
        Self {
            source,
            target,
            record_count: records.len(),
            field_count: records.field_names().len(),
            input_size: input_size as u64,
            output_size: output_size as u64,
            processing_time_ms: processing_time.as_millis() as u64,
        }
    }

    /// Output size relative to input, as a percentage
    pub fn size_ratio(&self) -> f32 {
        if self.input_size == 0 {
            return 0.0;
        }
        (self.output_size as f32 / self.input_size as f32) * 100.0
    }
}

/// Aggregated statistics over one or more conversions
#[derive(Debug, Clone, Serialize)]
pub struct ConversionStatistics {
    /// Sources converted successfully
    pub converted_count: usize,
    /// Sources that failed to convert
    pub failed_count: usize,
    /// Records across all successful conversions
    pub record_count: usize,
    pub input_size_bytes: u64,
    pub output_size_bytes: u64,
    pub processing_time_ms: u64,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ConversionStatistics {
    fn default() -> Self {
        Self {
            converted_count: 0,
            failed_count: 0,
            record_count: 0,
            input_size_bytes: 0,
            output_size_bytes: 0,
            processing_time_ms: 0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl ConversionStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a successful conversion
    pub fn record_success(&mut self, metadata: &ConversionMetadata) {
        self.converted_count += 1;
        self.record_count += metadata.record_count;
        self.input_size_bytes += metadata.input_size;
        self.output_size_bytes += metadata.output_size;
        self.processing_time_ms += metadata.processing_time_ms;
        self.collected_at = chrono::Utc::now();
    }

    /// Add a failed conversion
    pub fn record_failure(&mut self) {
        self.failed_count += 1;
        self.collected_at = chrono::Utc::now();
    }

    pub fn total_count(&self) -> usize {
        self.converted_count + self.failed_count
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "Converted {} of {} sources ({} records) in {}ms",
            self.converted_count,
            self.total_count(),
            self.record_count,
            self.processing_time_ms
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
