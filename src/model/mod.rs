pub mod series;
pub mod tick;
pub mod trend;
