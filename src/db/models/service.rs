use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewService {
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub name: String,
    #[validate(custom(function = validate_price))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: i32,
    #[validate(url)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateService {
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = validate_price))]
    pub price: Option<Decimal>,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: Option<i32>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price() {
        let payload = NewService {
            name: "Corte".into(),
            price: Decimal::new(-1000, 2),
            duration_minutes: 30,
            image_url: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn accepts_free_service() {
        let payload = NewService {
            name: "Avaliação".into(),
            price: Decimal::ZERO,
            duration_minutes: 15,
            image_url: None,
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn rejects_zero_duration() {
        let payload = NewService {
            name: "Corte".into(),
            price: Decimal::new(4500, 2),
            duration_minutes: 0,
            image_url: None,
        };
        assert!(payload.validate().is_err());
    }
}
