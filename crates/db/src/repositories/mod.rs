//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod fee_repo;
pub mod mark_repo;
pub mod material_repo;
pub mod salary_repo;
pub mod session_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use fee_repo::FeeRepo;
pub use mark_repo::MarkRepo;
pub use material_repo::MaterialRepo;
pub use salary_repo::SalaryRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
