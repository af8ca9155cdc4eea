//! Domain records exchanged with the school health backend.

pub mod child;
pub mod health_profile;
pub mod medical_order;
pub mod types;
pub mod vaccination_campaign;
