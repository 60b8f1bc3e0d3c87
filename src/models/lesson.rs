//! Lesson model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Lesson within a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: i64,
    /// Position within the course, starting at 1
    pub number: i32,
    pub title: String,
    pub theme: String,
    pub description: String,
    /// Header image URL
    #[serde(rename = "header_ava")]
    pub header_avatar: Option<String>,
    pub course_id: i64,
}

/// Create lesson request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLesson {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "header_ava")]
    pub header_avatar: Option<String>,
    pub course_id: i64,
}

/// Update lesson request; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLesson {
    #[validate(range(min = 1, message = "Number must be positive"))]
    pub number: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub theme: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "header_ava")]
    pub header_avatar: Option<String>,
    /// Move the lesson to another course
    pub course_id: Option<i64>,
}

impl UpdateLesson {
    pub fn apply(self, lesson: &mut Lesson) {
        if let Some(number) = self.number {
            lesson.number = number;
        }
        if let Some(title) = self.title {
            lesson.title = title;
        }
        if let Some(theme) = self.theme {
            lesson.theme = theme;
        }
        if let Some(description) = self.description {
            lesson.description = description;
        }
        if self.header_avatar.is_some() {
            lesson.header_avatar = self.header_avatar;
        }
        if let Some(course_id) = self.course_id {
            lesson.course_id = course_id;
        }
    }
}

/// Lesson list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LessonQuery {
    /// Page size (default: 5)
    pub limit: Option<String>,
    /// Rows to skip (default: 0)
    pub offset: Option<String>,
    /// Course whose lessons are listed (required)
    #[serde(rename = "courseId")]
    pub course_id: Option<String>,
    /// Include `meta.total` when true
    pub total: Option<String>,
}
