//! Data models for Coursify

pub mod course;
pub mod lesson;
pub mod page;
pub mod user;

// Re-export commonly used types
pub use course::{Course, CourseDetails, CourseRecord, CourseScope, Mentor};
pub use lesson::Lesson;
pub use page::{ListMeta, Page};
pub use user::{Credentials, User};
