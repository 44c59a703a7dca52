//! Profile Entity

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::value_object::nickname::Nickname;

/// Public profile attached to an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub nickname: Nickname,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl Profile {
    pub fn new(nickname: Nickname) -> Self {
        Self {
            nickname,
            first_name: None,
            last_name: None,
            avatar_url: None,
            bio: None,
            dob: None,
        }
    }
}
