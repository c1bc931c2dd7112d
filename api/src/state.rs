//! Application state shared across Axum route handlers and middleware.
//!
//! Built once at startup from a database connection. Every service holds only
//! its injected repositories; nothing here is mutated after construction apart
//! from the single-flight map inside [`WaterContentService`].

use db::repositories::{
    MeasurementRepository, MeasurementSource, WaterContentRepository, WaterContentStore,
};
use sea_orm::DatabaseConnection;
use services::{
    measurement_service::MeasurementService, statistics_service::StatisticsService,
    water_content_service::WaterContentService,
};
use std::sync::Arc;
use util::config;

/// Startup switches that tests set explicitly instead of reading the environment.
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub allowed_origins: Vec<String>,
    pub single_flight: bool,
    pub debug_routes: bool,
}

impl StateSettings {
    pub fn from_config() -> Self {
        Self {
            allowed_origins: config::allowed_origins(),
            single_flight: config::realtime_single_flight(),
            debug_routes: !config::is_production(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    measurements: MeasurementService,
    water_content: Arc<WaterContentService>,
    statistics: StatisticsService,
    allowed_origins: Arc<Vec<String>>,
    debug_routes: bool,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_settings(db, StateSettings::from_config())
    }

    pub fn with_settings(db: DatabaseConnection, settings: StateSettings) -> Self {
        let measurements: Arc<dyn MeasurementSource> =
            Arc::new(MeasurementRepository::new(db.clone()));
        let records: Arc<dyn WaterContentStore> = Arc::new(WaterContentRepository::new(db));

        Self::from_stores(measurements, records, settings)
    }

    /// Wires the services over arbitrary store implementations.
    pub fn from_stores(
        measurements: Arc<dyn MeasurementSource>,
        records: Arc<dyn WaterContentStore>,
        settings: StateSettings,
    ) -> Self {
        let water_content = WaterContentService::new(measurements.clone(), records.clone())
            .with_single_flight(settings.single_flight);

        Self {
            measurements: MeasurementService::new(measurements.clone()),
            water_content: Arc::new(water_content),
            statistics: StatisticsService::new(measurements, records),
            allowed_origins: Arc::new(settings.allowed_origins),
            debug_routes: settings.debug_routes,
        }
    }

    pub fn measurements(&self) -> &MeasurementService {
        &self.measurements
    }

    pub fn water_content(&self) -> &WaterContentService {
        &self.water_content
    }

    pub fn statistics(&self) -> &StatisticsService {
        &self.statistics
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn debug_routes(&self) -> bool {
        self.debug_routes
    }
}
