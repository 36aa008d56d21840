pub mod destinations;
pub mod triage;

pub use destinations::Destinations;
pub use triage::Triage;
