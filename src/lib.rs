pub mod command;
pub mod fileformat;
pub mod outlier;
pub mod plot;
pub mod seq;
pub mod stats;
pub mod utils;
