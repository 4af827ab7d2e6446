//! DTOs module - Data Transfer Objects
//!
//! DTOs separate the external API representation from the internal entities.
//! Row structs (`*Row`) are flat projections of enriched SELECTs; their DTO
//! counterparts nest the joined user columns into a summary object.

pub mod availability;
pub mod chat;
pub mod lesson_request;
pub mod message;
pub mod notification;
pub mod query;
pub mod review;
pub mod teacher;
pub mod user;

pub use availability::{UpsertDayDTO, UpsertSlotDTO};
pub use chat::{ChatDetailDTO, ChatOverviewDTO, ChatOverviewRow};
pub use lesson_request::{
    CreateLessonRequestDTO, LessonRequestDetailDTO, LessonRequestOverviewRow,
    LessonRequestViewDTO, NewLessonRequestDTO, UpdateRequestStatusDTO,
};
pub use message::{CreateMessageDTO, MessageDTO, MessageWithSenderRow, SendMessageDTO};
pub use notification::CreateNotificationDTO;
pub use query::{NotificationsQuery, RequestsQuery, SlotRangeQuery, TeacherSearchQuery};
pub use review::{
    CreateReviewDTO, NewReviewDTO, ReviewDTO, ReviewWithStudentRow, UpdateReviewDTO,
};
pub use teacher::{TeacherDTO, TeacherDetailDTO, TeacherSearchRow};
pub use user::UserSummaryDTO;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// HH:MM, 24-hour clock. Times are stored as text and compared
    /// lexicographically, so the format must be zero-padded.
    pub static ref TIME_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
}
