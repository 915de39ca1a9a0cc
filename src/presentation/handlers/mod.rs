pub mod currency;
pub mod envelope;
pub mod health;
pub mod index;
pub mod recommendations;
pub mod scam_prevention;
pub mod speech;
pub mod translation;
pub mod transportation;

pub use health::health_handler;
pub use index::{index_handler, not_found_handler};
