use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "profile_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProfileRole {
    Customer,
    Barber,
    Admin,
}

impl ProfileRole {
    /// Barbers and admins both take bookings.
    pub fn is_bookable(self) -> bool {
        matches!(self, ProfileRole::Barber | ProfileRole::Admin)
    }

    pub fn is_staff(self) -> bool {
        matches!(self, ProfileRole::Barber | ProfileRole::Admin)
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: ProfileRole,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Profile {
    /// First name for compact listings and e-mail greetings.
    pub fn display_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.full_name)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewProfile {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: ProfileRole,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<ProfileRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barbers_and_admins_are_bookable() {
        assert!(ProfileRole::Barber.is_bookable());
        assert!(ProfileRole::Admin.is_bookable());
        assert!(!ProfileRole::Customer.is_bookable());
    }

    #[test]
    fn display_name_takes_first_word() {
        let profile = Profile {
            id: Uuid::nil(),
            full_name: "Carlos Hartmann".into(),
            email: "carlos@example.com".into(),
            phone: None,
            avatar_url: None,
            role: ProfileRole::Barber,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        assert_eq!(profile.display_name(), "Carlos");
    }
}
