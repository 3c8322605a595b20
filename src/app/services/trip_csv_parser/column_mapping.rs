//! Column mapping and source schema resolution for raw trip files
//!
//! This module analyzes the CSV header to map column names to indices, verify
//! that every required column is present, and resolve the optional-column
//! capability descriptor that later stages branch on.

use crate::app::models::SourceSchema;
use crate::constants::REQUIRED_COLUMNS;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Column mapping for a raw trip file
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Capability descriptor resolved from the optional columns present
    pub schema: SourceSchema,
}

impl ColumnMapping {
    /// Analyze the header row, failing fast if a required column is absent
    ///
    /// Required-column absence is a structural defect of the source and aborts
    /// the run before any record is loaded.
    pub fn analyze(headers: &StringRecord, file: &str) -> Result<Self> {
        let mut name_to_index = HashMap::new();

        for (index, header) in headers.iter().enumerate() {
            name_to_index.insert(header.trim().to_string(), index);
        }

        for required in REQUIRED_COLUMNS {
            if !name_to_index.contains_key(*required) {
                return Err(Error::missing_column(file, *required));
            }
        }

        let schema = SourceSchema {
            has_id: name_to_index.contains_key("id"),
            has_vendor_id: name_to_index.contains_key("vendor_id"),
            has_passenger_count: name_to_index.contains_key("passenger_count"),
            has_trip_distance: name_to_index.contains_key("trip_distance"),
            has_fare_amount: name_to_index.contains_key("fare_amount"),
            has_tip_amount: name_to_index.contains_key("tip_amount"),
            has_store_and_fwd_flag: name_to_index.contains_key("store_and_fwd_flag"),
        };

        Ok(ColumnMapping {
            name_to_index,
            schema,
        })
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Number of columns in the source
    pub fn column_count(&self) -> usize {
        self.name_to_index.len()
    }
}
