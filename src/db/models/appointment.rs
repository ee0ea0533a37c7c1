use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Canceled,
}

#[allow(unused)]
impl AppointmentStatus {
    /// Canceled appointments never block a slot.
    pub fn occupies_slot(self) -> bool {
        !matches!(self, AppointmentStatus::Canceled)
    }
}

/// `starts_at` is shop-local wall clock; date and time are never split into
/// separate fields. `duration_minutes` is a snapshot of the service duration
/// taken at booking time, so later catalog edits do not move old bookings.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    #[serde(with = "crate::db::wall_clock")]
    pub starts_at: PrimitiveDateTime,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[allow(unused)]
impl Appointment {
    pub fn ends_at(&self) -> PrimitiveDateTime {
        self.starts_at + Duration::minutes(self.duration_minutes as i64)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAppointment {
    pub professional_id: Uuid,
    pub service_id: Uuid,
    #[serde(with = "crate::db::wall_clock")]
    pub starts_at: PrimitiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RescheduleAppointment {
    pub professional_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    #[serde(default, with = "crate::db::wall_clock::option")]
    pub starts_at: Option<PrimitiveDateTime>,
}

/// Appointment joined with the names the agenda and e-mail templates need.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AppointmentDetails {
    pub id: Uuid,
    #[serde(with = "crate::db::wall_clock")]
    pub starts_at: PrimitiveDateTime,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub service_name: String,
    pub professional_name: String,
    pub customer_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn ends_at_adds_snapshot_duration() {
        let appointment = Appointment {
            id: Uuid::nil(),
            customer_id: Uuid::nil(),
            professional_id: Uuid::nil(),
            service_id: Uuid::nil(),
            starts_at: datetime!(2026-03-02 10:00),
            duration_minutes: 45,
            status: AppointmentStatus::Confirmed,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        assert_eq!(appointment.ends_at(), datetime!(2026-03-02 10:45));
    }

    #[test]
    fn only_canceled_frees_the_slot() {
        assert!(AppointmentStatus::Pending.occupies_slot());
        assert!(AppointmentStatus::Confirmed.occupies_slot());
        assert!(!AppointmentStatus::Canceled.occupies_slot());
    }
}
