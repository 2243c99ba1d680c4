pub mod chart;
pub mod geocode;
pub mod presenter;
pub mod weather;
