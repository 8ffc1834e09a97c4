pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::connect;
pub use error::{DbError, Result};
pub use repositories::task_repository::TaskRepository;
pub use repositories::token_repository::TokenRepository;
pub use repositories::user_repository::UserRepository;
