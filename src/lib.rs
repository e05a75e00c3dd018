// Library for tests to access modules

pub mod alert_repo;
pub mod alerts;
pub mod config;
pub mod error;
pub mod history;
pub mod metric_source;
pub mod models;
pub mod monitor;
pub mod routes;
pub mod worker;
