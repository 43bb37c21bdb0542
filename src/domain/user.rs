//! User - Account record listed by the users screen

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Member,
    Guest,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Member, UserRole::Guest];

    /// Lowercase name accepted on the command line
    pub fn key(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
            UserRole::Guest => "guest",
        }
    }

    /// Human readable role name
    pub fn display_name(self) -> &'static str {
        match self {
            UserRole::Admin => "Administrator",
            UserRole::Member => "Member",
            UserRole::Guest => "Guest",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        if key == "administrator" {
            return Ok(UserRole::Admin);
        }
        UserRole::ALL
            .into_iter()
            .find(|role| role.key() == key)
            .ok_or(Error::InvalidArgument {
                name: "role".to_string(),
                value: key,
            })
    }
}

/// A user account as returned by the users API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    #[serde(default)]
    pub email_verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Status label shown in the status column
    pub fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }
}

/// Parse a users payload: either a bare array or `{ "data": [...] }`
pub fn parse_users(json: &str) -> Result<Vec<User>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        List(Vec<User>),
        Page { data: Vec<User> },
    }

    Ok(match serde_json::from_str(json)? {
        Payload::List(users) => users,
        Payload::Page { data } => data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "data": [{
            "id": "u1",
            "role": "ADMIN",
            "name": "Murilo Viana",
            "email": "murilo@example.com",
            "isActive": true,
            "emailVerifiedAt": null,
            "createdAt": "2024-05-01T12:00:00Z",
            "updatedAt": "2024-05-02T12:00:00Z"
        }],
        "total": 1
    }"#;

    #[test]
    fn parses_paged_payload() {
        let users = parse_users(PAGE).expect("valid payload");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, UserRole::Admin);
        assert!(users[0].is_active);
        assert_eq!(users[0].last_login_at, None);
        assert_eq!(users[0].status_label(), "Active");
    }

    #[test]
    fn parses_bare_list() {
        let users = parse_users("[]").expect("valid payload");
        assert!(users.is_empty());
        assert!(parse_users("{").is_err());
    }

    #[test]
    fn role_from_str() {
        assert_eq!("Admin".parse::<UserRole>().ok(), Some(UserRole::Admin));
        assert_eq!("guest".parse::<UserRole>().ok(), Some(UserRole::Guest));
        assert_eq!(" Administrator ".parse::<UserRole>().ok(), Some(UserRole::Admin));
        assert!("owner".parse::<UserRole>().is_err());
        for role in UserRole::ALL {
            assert_eq!(role.key().parse::<UserRole>().ok(), Some(role));
        }
    }
}
