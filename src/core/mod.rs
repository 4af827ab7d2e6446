pub mod auth;
pub mod error;
pub mod notify;
pub mod state;

pub use error::AppError;
pub use notify::NotificationDispatcher;
pub use state::AppState;
