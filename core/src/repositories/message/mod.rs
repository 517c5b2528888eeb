//! Message repository module.

mod r#trait;
pub use r#trait::MessageRepository;

mod mock;
pub use mock::MockMessageRepository;
