pub mod measurement_repository;
pub mod water_content_repository;

pub use measurement_repository::{MeasurementRepository, MeasurementSource};
pub use water_content_repository::{WaterContentRepository, WaterContentStore};
