pub mod auth;
pub mod garage_service;
pub mod lead_service;
pub mod membership_service;
pub mod public_service;
pub mod vehicle_service;
