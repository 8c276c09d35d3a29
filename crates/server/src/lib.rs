pub mod auth;
pub mod errors;
pub mod routes;
pub mod startup;
pub mod store;

pub use startup::run;
