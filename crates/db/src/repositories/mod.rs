//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or an open transaction) as the first argument.

pub mod booking_repo;
pub mod nomer_repo;
pub mod promotion_repo;
pub mod role_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use nomer_repo::NomerRepo;
pub use promotion_repo::PromotionRepo;
pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;
