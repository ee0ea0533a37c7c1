use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Time, Weekday};
use validator::{Validate, ValidationError};

/// One rule per weekday, 0 = Sunday .. 6 = Saturday. A weekday with no rule
/// is treated as closed by the availability engine.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct WorkingHoursRule {
    pub day_of_week: i16,
    #[serde(with = "super::time_formats::clock_time")]
    pub opens_at: Time,
    #[serde(with = "super::time_formats::clock_time")]
    pub closes_at: Time,
    pub is_closed: bool,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = validate_open_interval))]
pub struct UpsertWorkingHours {
    #[serde(with = "super::time_formats::clock_time")]
    pub opens_at: Time,
    #[serde(with = "super::time_formats::clock_time")]
    pub closes_at: Time,
    #[serde(default)]
    pub is_closed: bool,
}

fn validate_open_interval(payload: &UpsertWorkingHours) -> Result<(), ValidationError> {
    if !payload.is_closed && payload.opens_at >= payload.closes_at {
        return Err(ValidationError::new("opens_at_after_closes_at"));
    }
    Ok(())
}

/// Index into the 0=Sunday..6=Saturday convention used by the schedule table.
pub fn weekday_index(weekday: Weekday) -> i16 {
    weekday.number_days_from_sunday() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    #[test]
    fn open_rule_requires_opens_before_closes() {
        let payload = UpsertWorkingHours {
            opens_at: time!(18:00),
            closes_at: time!(09:00),
            is_closed: false,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn closed_rule_ignores_interval_order() {
        let payload = UpsertWorkingHours {
            opens_at: time!(18:00),
            closes_at: time!(09:00),
            is_closed: true,
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn weekday_index_is_zero_based_on_sunday() {
        assert_eq!(weekday_index(Weekday::Sunday), 0);
        assert_eq!(weekday_index(Weekday::Monday), 1);
        assert_eq!(weekday_index(Weekday::Saturday), 6);
    }
}
