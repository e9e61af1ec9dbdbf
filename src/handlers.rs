pub mod auth;
pub mod garage;
pub mod garage_users;
pub mod leads;
pub mod public;
pub mod vehicles;
