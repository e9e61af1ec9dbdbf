pub mod auth;
pub mod garage;
pub mod lead;
pub mod membership;
pub mod vehicle;
