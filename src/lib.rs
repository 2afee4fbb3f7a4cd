pub mod analytics;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod infra;
pub mod model;
pub mod output;
pub mod parser;
pub mod report;
pub mod services;
pub mod session;
