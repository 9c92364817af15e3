pub mod cli;
pub mod config;
pub mod error;
pub mod html;
pub mod model;
pub mod profile;
pub mod report;
