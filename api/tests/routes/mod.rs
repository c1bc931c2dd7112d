mod measurements_test;
mod statistics_test;
mod water_content_test;
