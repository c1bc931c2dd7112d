//! Derive-and-cache workflow for water content.
//!
//! The latest measurement is looked up, checked against the derived records,
//! and either computed fresh (`should_save = true`) or served from the stored
//! record (`should_save = false`). Saving a result with `should_save = false`
//! never touches the store, which keeps at most one record per measurement.
//!
//! The check and the insert are separate round trips. Within one process the
//! [`SingleFlight`] gate serializes calculate+save per measurement id so two
//! concurrent polls cannot both insert. Separate processes sharing a store can
//! still race; the store has no uniqueness constraint on `measurement_id`.

use chrono::{DateTime, Utc};
use db::models::measurement::Model as Measurement;
use db::models::water_content::{HistoryEntry, NewWaterContent};
use db::repositories::{MeasurementSource, WaterContentStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::{WaterContentError, WaterContentResult};
use crate::formula;
use crate::measurement_service::MeasurementService;
use crate::single_flight::SingleFlight;

pub const REALTIME_NOTES: &str = "Real-time calculation";
pub const ALREADY_PROCESSED: &str = "Already processed";

/// Result envelope shared by the calculate, save and realtime paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterContentCalculation {
    pub measurement_id: i64,
    pub frequency: i64,
    pub frequency_ghz: String,
    pub return_loss_db: f64,
    pub water_content_percent: f64,
    pub vswr: f64,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub is_new_calculation: bool,
    pub already_processed: bool,
    pub should_save: bool,
}

impl WaterContentCalculation {
    fn from_measurement(
        m: &Measurement,
        water_content_percent: f64,
        timestamp: DateTime<Utc>,
        is_new: bool,
    ) -> Self {
        Self {
            measurement_id: m.id,
            frequency: m.frequency,
            frequency_ghz: frequency_ghz(m.frequency),
            return_loss_db: m.return_loss_db,
            water_content_percent,
            vswr: m.vswr,
            session_id: m.session_id.clone(),
            timestamp,
            is_new_calculation: is_new,
            already_processed: !is_new,
            should_save: is_new,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaveOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_content_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    pub auto_saved: bool,
    pub save_skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationDetails {
    pub formula: String,
    pub raw_calculation: String,
}

/// Calculation plus what happened when persisting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedCalculation {
    #[serde(flatten)]
    pub calculation: WaterContentCalculation,
    #[serde(flatten)]
    pub outcome: SaveOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_details: Option<CalculationDetails>,
}

pub struct WaterContentService {
    measurements: MeasurementService,
    records: Arc<dyn WaterContentStore>,
    gate: Option<SingleFlight>,
}

impl WaterContentService {
    /// Builds the service with the single-flight gate enabled.
    pub fn new(
        measurements: Arc<dyn MeasurementSource>,
        records: Arc<dyn WaterContentStore>,
    ) -> Self {
        Self {
            measurements: MeasurementService::new(measurements),
            records,
            gate: Some(SingleFlight::new()),
        }
    }

    /// With `false`, concurrent saves for the same measurement are best-effort.
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.gate = enabled.then(SingleFlight::new);
        self
    }

    /// Computes (or retrieves) water content for the latest measurement.
    /// Never writes.
    pub async fn calculate_from_latest(&self) -> WaterContentResult<WaterContentCalculation> {
        let latest = self.measurements.latest().await?;
        self.calculate_for(latest).await
    }

    async fn calculate_for(&self, m: Measurement) -> WaterContentResult<WaterContentCalculation> {
        let already_processed = self
            .records
            .exists_for_measurement(m.id)
            .await
            .map_err(WaterContentError::PersistenceError)?;

        debug!(measurement_id = m.id, already_processed, "Checked measurement");

        if already_processed {
            let existing = self
                .records
                .by_measurement(m.id)
                .await
                .map_err(WaterContentError::PersistenceError)?;

            let (percent, timestamp) = match existing.first() {
                Some(r) if r.water_content_percent.is_finite() => {
                    (r.water_content_percent, r.timestamp)
                }
                Some(r) => (formula::derive(m.return_loss_db), r.timestamp),
                None => (formula::derive(m.return_loss_db), Utc::now()),
            };

            return Ok(WaterContentCalculation::from_measurement(
                &m, percent, timestamp, false,
            ));
        }

        formula::validate(m.return_loss_db)?;
        let percent = formula::derive(m.return_loss_db);
        debug!(
            measurement_id = m.id,
            return_loss_db = m.return_loss_db,
            water_content_percent = percent,
            "Computed water content"
        );

        Ok(WaterContentCalculation::from_measurement(
            &m,
            percent,
            Utc::now(),
            true,
        ))
    }

    /// Persists a calculation if it is flagged `should_save`.
    ///
    /// Store failures are reported in the outcome; the computed values are
    /// always returned.
    pub async fn save_calculation(
        &self,
        calculation: WaterContentCalculation,
        notes: Option<String>,
    ) -> SavedCalculation {
        if !calculation.should_save {
            debug!(
                measurement_id = calculation.measurement_id,
                "Skipping save, already processed"
            );
            return SavedCalculation {
                calculation,
                outcome: SaveOutcome {
                    auto_saved: false,
                    save_skipped: true,
                    save_reason: Some(ALREADY_PROCESSED.into()),
                    ..Default::default()
                },
                calculation_details: None,
            };
        }

        let notes = notes
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Calculated from measurement at {} GHz",
                    calculation.frequency_ghz
                )
            });

        let record = NewWaterContent {
            measurement_id: calculation.measurement_id,
            return_loss_db: calculation.return_loss_db,
            water_content_percent: calculation.water_content_percent,
            frequency: calculation.frequency,
            session_id: calculation.session_id.clone(),
            notes: Some(notes),
        };

        let outcome = match self.records.insert(record).await {
            Ok(saved) => {
                info!(
                    measurement_id = calculation.measurement_id,
                    water_content_id = saved.id,
                    "Water content saved"
                );
                SaveOutcome {
                    water_content_id: Some(saved.id),
                    saved_at: Some(saved.timestamp),
                    auto_saved: true,
                    save_skipped: false,
                    ..Default::default()
                }
            }
            Err(e) => {
                let err = WaterContentError::PersistenceError(e);
                error!(
                    measurement_id = calculation.measurement_id,
                    error = %err,
                    "Failed to save water content"
                );
                SaveOutcome {
                    auto_saved: false,
                    save_skipped: false,
                    save_error: Some(err.to_string()),
                    ..Default::default()
                }
            }
        };

        SavedCalculation {
            calculation,
            outcome,
            calculation_details: None,
        }
    }

    /// Calculate for the latest measurement and save it if new.
    pub async fn calculate_and_save(
        &self,
        notes: Option<String>,
    ) -> WaterContentResult<SavedCalculation> {
        let latest = self.measurements.latest().await?;

        let _permit = match &self.gate {
            Some(gate) => Some(gate.acquire(latest.id).await),
            None => None,
        };

        let calculation = self.calculate_for(latest).await?;
        Ok(self.save_calculation(calculation, notes).await)
    }

    /// Polling entry point: calculate, save if new, and attach the formula breakdown.
    pub async fn realtime(&self) -> WaterContentResult<SavedCalculation> {
        let mut result = self.calculate_and_save(Some(REALTIME_NOTES.into())).await?;

        result.calculation_details = Some(CalculationDetails {
            formula: formula::FORMULA.into(),
            raw_calculation: formula::raw_calculation(
                result.calculation.return_loss_db,
                result.calculation.water_content_percent,
            ),
        });

        Ok(result)
    }

    /// Newest `limit` derived records with their source projection.
    pub async fn history(&self, limit: u64) -> WaterContentResult<Vec<HistoryEntry>> {
        self.records
            .history(limit)
            .await
            .map_err(WaterContentError::PersistenceError)
    }
}

pub fn frequency_ghz(frequency_hz: i64) -> String {
    format!("{:.3}", frequency_hz as f64 / 1e9)
}
