//! User domain model

use serde::{Deserialize, Serialize};

use super::record::{parse_bool, split_exact, ParseError, Record};

/// A registered user. `username` is the durable key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_digest: String,
    pub salt: String,
    pub is_active: bool,
}

impl User {
    /// New users start active
    pub fn new(
        username: impl Into<String>,
        password_digest: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_digest: password_digest.into(),
            salt: salt.into(),
            is_active: true,
        }
    }
}

impl Record for User {
    const FILE_NAME: &'static str = "users.txt";

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.username, self.password_digest, self.salt, self.is_active
        )
    }

    fn from_line(line: &str) -> Result<Self, ParseError> {
        let fields = split_exact(line, 4)?;
        Ok(Self {
            username: fields[0].to_string(),
            password_digest: fields[1].to_string(),
            salt: fields[2].to_string(),
            is_active: parse_bool("isActive", fields[3])?,
        })
    }
}
