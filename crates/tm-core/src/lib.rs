pub mod models;

pub use error_location::ErrorLocation;
pub use models::task::Task;
pub use models::user::User;
pub use models::user_dto::UserDto;

#[cfg(test)]
mod tests;
