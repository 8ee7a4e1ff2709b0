//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod equipment_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod room_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use equipment_repo::EquipmentRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use room_repo::RoomRepo;
pub use user_repo::UserRepo;
