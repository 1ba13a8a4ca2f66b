use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

pub use create_user::create_user;
pub use delete_user::delete_user;
pub use get_user::get_user;
pub use list_users::list_users;
pub use update_user::update_user;

/// Public view of a user. The password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseData {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            age: user.age.map(|age| age.value()),
            created_at: user.created_at,
        }
    }
}
