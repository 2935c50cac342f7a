//! Actix middleware shared by inbound adapters.

pub mod request_id;

pub use request_id::Correlate;
