//! Field observations
//!
//! One soil/climate measurement set submitted by a farmer. Categorical fields
//! are kept as strings: the UI vocabulary (`Region`, `SoilType`) can grow
//! ahead of the trained encoders, and the encoder is the one place that
//! decides whether a value is known.

use crate::error::{RecommendError, Result};
use anyhow::Context;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canonical feature order shared by the scaler and the crop model
pub const FEATURE_ORDER: [&str; 9] = [
    "region",
    "soil_type",
    "N",
    "P",
    "K",
    "pH",
    "temperature",
    "humidity",
    "rainfall",
];

/// Categorical fields, in encoding order
pub const CATEGORICAL_FIELDS: [&str; 2] = ["region", "soil_type"];

/// Numeric fields, in encoding order
pub const NUMERIC_FIELDS: [&str; 7] = ["N", "P", "K", "pH", "temperature", "humidity", "rainfall"];

/// Regions offered by the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Central,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
        }
    }
}

/// Soil textures offered by the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Loamy,
    Sandy,
    Clayey,
    Silty,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [SoilType::Loamy, SoilType::Sandy, SoilType::Clayey, SoilType::Silty];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loamy => "Loamy",
            SoilType::Sandy => "Sandy",
            SoilType::Clayey => "Clayey",
            SoilType::Silty => "Silty",
        }
    }
}

/// Raw measurements for one recommendation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub region: String,
    pub soil_type: String,

    /// Soil nitrogen (kg/ha)
    #[serde(rename = "N")]
    pub nitrogen: f64,
    /// Soil phosphorus (kg/ha)
    #[serde(rename = "P")]
    pub phosphorus: f64,
    /// Soil potassium (kg/ha)
    #[serde(rename = "K")]
    pub potassium: f64,
    /// Soil pH
    #[serde(rename = "pH")]
    pub ph: f64,

    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Rainfall (mm)
    pub rainfall: f64,
}

impl Observation {
    /// Build an observation from the form's enumerated choices
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region: Region,
        soil_type: SoilType,
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        ph: f64,
        temperature: f64,
        humidity: f64,
        rainfall: f64,
    ) -> Self {
        Self {
            region: region.as_str().to_string(),
            soil_type: soil_type.as_str().to_string(),
            nitrogen,
            phosphorus,
            potassium,
            ph,
            temperature,
            humidity,
            rainfall,
        }
    }

    /// Categorical value by field name
    pub fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            "region" => Some(&self.region),
            "soil_type" => Some(&self.soil_type),
            _ => None,
        }
    }

    /// Numeric values in `NUMERIC_FIELDS` order
    pub fn numeric_values(&self) -> [f64; 7] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.ph,
            self.temperature,
            self.humidity,
            self.rainfall,
        ]
    }

    /// Check physical ranges
    ///
    /// N, P, K and rainfall must be non-negative, pH within [3, 9],
    /// humidity within [0, 100]. Every numeric value must be finite.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in NUMERIC_FIELDS.iter().zip(self.numeric_values()) {
            if !value.is_finite() {
                return Err(invalid(field, value));
            }
        }

        let non_negative = [
            ("N", self.nitrogen),
            ("P", self.phosphorus),
            ("K", self.potassium),
            ("rainfall", self.rainfall),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(field, value));
            }
        }

        if !(3.0..=9.0).contains(&self.ph) {
            return Err(invalid("pH", self.ph));
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(invalid("humidity", self.humidity));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: f64) -> RecommendError {
    RecommendError::InvalidObservation {
        field: field.to_string(),
        value,
    }
}

/// True when `path` has a `.csv` extension, in any letter case
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Load a batch of observations from CSV
///
/// Expects a header with `region, soil_type, N, P, K, pH, temperature,
/// humidity, rainfall`. Integer columns are cast to floats. A missing or
/// non-numeric cell is an error naming its row and column, so the output
/// stays aligned with the file's rows.
pub fn load_observations_csv(path: &Path) -> anyhow::Result<Vec<Observation>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load observations CSV: {:?}", path))?;

    let region = df.column("region")
        .with_context(|| "Column 'region' not found")?
        .str()
        .with_context(|| "Column 'region' is not string type")?;
    let soil_type = df.column("soil_type")
        .with_context(|| "Column 'soil_type' not found")?
        .str()
        .with_context(|| "Column 'soil_type' is not string type")?;

    let mut numeric = Vec::with_capacity(NUMERIC_FIELDS.len());
    for name in NUMERIC_FIELDS {
        let column = df.column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;
        numeric.push(column);
    }
    let numeric = numeric
        .iter()
        .map(|c| c.f64().with_context(|| "Failed to read numeric column"))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut observations = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        // 1-based data row, header excluded
        let row = idx + 1;
        let (Some(r), Some(s)) = (region.get(idx), soil_type.get(idx)) else {
            let field = if region.get(idx).is_none() { "region" } else { "soil_type" };
            anyhow::bail!("Row {}: missing value in column '{}' ({:?})", row, field, path);
        };

        let mut v = [0.0; NUMERIC_FIELDS.len()];
        for (slot, (name, column)) in v.iter_mut().zip(NUMERIC_FIELDS.iter().zip(&numeric)) {
            *slot = column.get(idx).with_context(|| {
                format!("Row {}: missing or non-numeric value in column '{}' ({:?})", row, name, path)
            })?;
        }

        observations.push(Observation {
            region: r.to_string(),
            soil_type: s.to_string(),
            nitrogen: v[0],
            phosphorus: v[1],
            potassium: v[2],
            ph: v[3],
            temperature: v[4],
            humidity: v[5],
            rainfall: v[6],
        });
    }

    tracing::info!("Loaded {} observations from {:?}", observations.len(), path);
    Ok(observations)
}
