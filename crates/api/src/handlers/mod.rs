pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod leads;
pub mod tasks;
