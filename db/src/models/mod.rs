pub mod measurement;
pub mod water_content;
