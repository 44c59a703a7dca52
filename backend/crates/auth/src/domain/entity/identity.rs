//! Public Identity
//!
//! What the gate attaches to an authenticated request and what
//! `GET /user/me` returns. Contains no credential material.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Serialize;

use super::{account::Account, profile::Profile};
use crate::domain::value_object::email::Email;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIdentity {
    pub id: UserId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub profile: Profile,
}

impl PublicIdentity {
    pub fn new(account: &Account, profile: Profile) -> Self {
        Self {
            id: account.user_id,
            email: account.email.clone(),
            created_at: account.created_at,
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{nickname::Nickname, user_password::UserPassword};
    use platform::password::{MIN_WORK_FACTOR, PasswordHasher};

    #[test]
    fn test_serialized_shape_has_no_secrets() {
        let hasher = PasswordHasher::new(MIN_WORK_FACTOR).unwrap();
        let password = crate::domain::value_object::user_password::RawPassword::new(
            "Xq7!mZr#pL2v".to_string(),
        )
        .unwrap();
        let account = Account::new(
            Email::new("user@example.com").unwrap(),
            UserPassword::from_raw(&password, &hasher).unwrap(),
        );
        let identity = PublicIdentity::new(&account, Profile::new(Nickname::from_db("CalmFox7")));

        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["id"], account.user_id.to_string());
        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["profile"]["nickname"], "CalmFox7");
        assert!(json["profile"]["firstName"].is_null());
        assert!(json.get("createdAt").is_some());

        let text = json.to_string();
        assert!(!text.contains("argon2"));
        assert!(!text.contains("password"));
    }
}
