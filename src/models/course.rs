//! Course model, membership relations and listing scopes

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Stored course row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub avatar: Option<String>,
    /// Creator of the course
    pub owner_id: i64,
}

/// Course as seen by a given user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub avatar: Option<String>,
    pub owner_id: i64,
    /// Number of enrolled students
    pub students_count: i64,
    /// Whether the requesting user is enrolled
    pub entered: bool,
}

impl Course {
    pub fn from_record(record: CourseRecord, students_count: i64, entered: bool) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            avatar: record.avatar,
            owner_id: record.owner_id,
            students_count,
            entered,
        }
    }
}

/// Course detail view with its mentors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub mentors: Vec<Mentor>,
}

/// User holding a role on a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Mentor {
    pub user_id: i64,
    pub login: String,
    pub name: String,
    pub avatar: Option<String>,
    pub role: String,
}

/// Create course request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourse {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub avatar: Option<String>,
}

/// Update course request; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourse {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
}

impl UpdateCourse {
    pub fn apply(self, record: &mut CourseRecord) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if self.avatar.is_some() {
            record.avatar = self.avatar;
        }
    }
}

/// Assign mentor request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignMentor {
    pub user_id: i64,
    #[validate(length(min = 1, max = 64, message = "Role must be between 1 and 64 characters"))]
    pub role: String,
}

/// Which courses a listing covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseScope {
    /// Every course
    #[default]
    All,
    /// Courses the caller is enrolled in
    My,
    /// Courses the caller owns or mentors
    Admin,
}

impl std::str::FromStr for CourseScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(CourseScope::All),
            "my" => Ok(CourseScope::My),
            "admin" => Ok(CourseScope::Admin),
            other => Err(format!("Invalid course list type: {}", other)),
        }
    }
}

/// Course list query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQuery {
    /// Page size (default: 5)
    pub limit: Option<String>,
    /// Rows to skip (default: 0)
    pub offset: Option<String>,
    /// `all`, `my` or `admin` (default: all)
    #[serde(rename = "type")]
    pub scope: Option<String>,
    /// Substring matched against the title
    pub search: Option<String>,
    /// Include `meta.total` when true
    pub total: Option<String>,
}

/// Filter handed to the course store
#[derive(Debug, Clone)]
pub struct CourseFilter {
    pub scope: CourseScope,
    /// Caller; drives `entered` and the `my`/`admin` scopes
    pub viewer_id: i64,
    pub search: Option<String>,
}
