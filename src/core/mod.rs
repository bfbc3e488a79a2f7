pub mod classifier;
pub mod config;
pub mod error;
pub mod keywords;
pub mod source;
pub mod video;
