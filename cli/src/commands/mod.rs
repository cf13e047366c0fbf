pub mod estimate;
pub mod query;
pub mod sample;
