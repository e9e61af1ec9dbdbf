pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod garage_repo;
pub use garage_repo::GarageRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod membership_repo;
pub use membership_repo::MembershipRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod vehicle_repo;
pub use vehicle_repo::VehicleRepository;
