use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Public user representation.
pub struct User {
    /// User id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Account role (`admin` or `user`).
    pub role: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Public category representation.
pub struct Category {
    /// Category id.
    pub id: i64,
    /// Category name.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Public post representation with its author and category embedded.
pub struct Post {
    /// Post id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// The author.
    pub user: User,
    /// The category the post belongs to.
    pub category: Category,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update time (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Response of a successful registration or login.
pub struct AuthResponse {
    /// JWT access token.
    pub access_token: String,
    /// The authenticated user.
    pub user: User,
}
