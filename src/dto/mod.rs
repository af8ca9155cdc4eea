//! DTOs that bridge page services with the shell rendering them.

pub mod child;
pub mod dashboard;
pub mod medical_order;
pub mod vaccination_campaign;
