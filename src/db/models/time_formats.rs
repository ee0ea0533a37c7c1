//! Serde formats for shop-local wall-clock values. Appointment starts travel
//! as `2026-03-02T10:30:00` and opening hours as `09:00` — no zone, matching
//! the single local frame everything is compared in.

/// `PrimitiveDateTime` as `[year]-[month]-[day]T[hour]:[minute]:[second]`.
pub mod wall_clock {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;
    use time::PrimitiveDateTime;

    const FORMAT: &[BorrowedFormatItem<'_>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

    pub fn serialize<S>(value: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value
            .format(&FORMAT)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&raw, &FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S>(
            value: &Option<PrimitiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|raw| PrimitiveDateTime::parse(&raw, &FORMAT).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// `Time` as `[hour]:[minute]`, the shape the schedule UI exchanges.
pub mod clock_time {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;
    use time::Time;

    const FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

    pub fn serialize<S>(value: &Time, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value
            .format(&FORMAT)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Time, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Time::parse(&raw, &FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `Date` as `[year]-[month]-[day]`, for query-string parameters.
pub mod calendar_date {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;
    use time::Date;

    const FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(value: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value
            .format(&FORMAT)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, &FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::macros::{datetime, time};

    #[derive(Serialize, Deserialize)]
    struct WallClockProbe {
        #[serde(with = "super::wall_clock")]
        at: time::PrimitiveDateTime,
    }

    #[derive(Serialize, Deserialize)]
    struct ClockTimeProbe {
        #[serde(with = "super::clock_time")]
        at: time::Time,
    }

    #[test]
    fn wall_clock_round_trips_without_zone() {
        let json = serde_json::to_string(&WallClockProbe {
            at: datetime!(2026-03-02 10:30),
        })
        .unwrap();
        assert_eq!(json, r#"{"at":"2026-03-02T10:30:00"}"#);

        let probe: WallClockProbe = serde_json::from_str(&json).unwrap();
        assert_eq!(probe.at, datetime!(2026-03-02 10:30));
    }

    #[test]
    fn clock_time_uses_hour_minute() {
        let json = serde_json::to_string(&ClockTimeProbe { at: time!(09:00) }).unwrap();
        assert_eq!(json, r#"{"at":"09:00"}"#);

        let probe: ClockTimeProbe = serde_json::from_str(r#"{"at":"18:30"}"#).unwrap();
        assert_eq!(probe.at, time!(18:30));
    }
}
