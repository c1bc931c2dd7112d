pub mod m202506090001_create_nanovna_measurements;
pub mod m202506090002_create_water_content;
