//! Application State - shared state for all routes and middleware
//!
//! Holds one repository per table plus the notification dispatcher and the
//! raw pool for handlers that need to coordinate repositories inside a
//! single transaction.

use crate::core::NotificationDispatcher;
use crate::repositories::{
    AvailabilityRepository, ChatRepository, FavoriteRepository, LessonRequestRepository,
    MessageRepository, NotificationRepository, ReviewRepository, TeacherRepository,
    UserRepository,
};
use sqlx::SqlitePool;

pub struct AppState {
    pub user: UserRepository,
    pub request: LessonRequestRepository,
    pub chat: ChatRepository,
    pub msg: MessageRepository,
    pub notification: NotificationRepository,
    pub teacher: TeacherRepository,
    pub favorite: FavoriteRepository,
    pub availability: AvailabilityRepository,
    pub review: ReviewRepository,

    /// Best-effort dispatch of user notifications
    pub dispatcher: NotificationDispatcher,

    /// Shared pool, exposed for multi-repository transactions
    pub pool: SqlitePool,

    /// Secret key for JWT token verification
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            request: LessonRequestRepository::new(pool.clone()),
            chat: ChatRepository::new(pool.clone()),
            msg: MessageRepository::new(pool.clone()),
            notification: NotificationRepository::new(pool.clone()),
            teacher: TeacherRepository::new(pool.clone()),
            favorite: FavoriteRepository::new(pool.clone()),
            availability: AvailabilityRepository::new(pool.clone()),
            review: ReviewRepository::new(pool.clone()),
            dispatcher: NotificationDispatcher::new(NotificationRepository::new(pool.clone())),
            pool,
            jwt_secret,
        }
    }
}
