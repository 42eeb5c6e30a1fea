use crate::resource::models::{Entity, Resource, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: Option<ResourceId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub login: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Plaintext until the user is created, then the bcrypt hash.
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl User {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            ..Default::default()
        }
    }
}

impl Entity for User {
    type Id = ResourceId;

    #[inline]
    fn id(&self) -> Option<ResourceId> {
        self.id
    }

    #[inline]
    fn set_id(&mut self, id: ResourceId) {
        self.id = Some(id);
    }
}

impl Resource for User {
    fn reference(&self) -> Option<&str> {
        Some(&self.login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_never_serialized() {
        let mut user = User::new("jdoe", "$2b$04$hash");
        user.id = Some(3);

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["login"], "jdoe");
        assert_eq!(json["id"], 3);
        assert!(json.get("password").is_none());

        let back: User = serde_json::from_value(json).unwrap();
        assert!(back.password.is_empty());
        assert_eq!(back.reference(), Some("jdoe"));
    }
}
