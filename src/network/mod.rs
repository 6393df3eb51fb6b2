pub mod client;
pub mod error;
pub mod worker;

pub use client::BackendClient;
pub use worker::ApiWorker;
