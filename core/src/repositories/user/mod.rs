//! User repository module.

mod r#trait;
pub use r#trait::UserRepository;

mod mock;
pub use mock::MockUserRepository;
