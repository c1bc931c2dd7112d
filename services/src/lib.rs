pub mod error;
pub mod formula;
pub mod measurement_service;
pub mod single_flight;
pub mod statistics_service;
pub mod water_content_service;

#[cfg(test)]
pub(crate) mod test_doubles;
