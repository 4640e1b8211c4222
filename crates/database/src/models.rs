//! Database models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::DatabaseError;

/// Which of a teacher's three parameter tables a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamScope {
    /// Class listing gateway: `userId`, `teacherCode`, `stafftoken`, ...
    Gateway,
    /// Roster queries: `schoolId`, `classGroupCode`, `chatId`, ...
    Roster,
    /// Message send: `wxUserId`, `teacher`, `classReq`, `content`, ...
    Send,
}

impl ParamScope {
    /// Column value for this scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamScope::Gateway => "gateway",
            ParamScope::Roster => "roster",
            ParamScope::Send => "send",
        }
    }
}

impl fmt::Display for ParamScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamScope {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gateway" => Ok(ParamScope::Gateway),
            "roster" => Ok(ParamScope::Roster),
            "send" => Ok(ParamScope::Send),
            other => Err(DatabaseError::UnknownScope(other.to_string())),
        }
    }
}

/// A single stored teacher parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TeacherParam {
    /// Teacher (account) identifier.
    pub teacher_id: String,
    /// Scope name, see [`ParamScope`].
    pub scope: String,
    /// Parameter name, e.g. `teacherCode`.
    pub key: String,
    /// Parameter value, stored as text.
    pub value: String,
    /// Last update timestamp.
    pub updated_at: String,
}
