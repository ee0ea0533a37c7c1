use sqlx::types::Uuid;
use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::availability::ConflictMode;
use crate::db::error::DatabaseError;
use crate::db::models::{Appointment, AppointmentDetails, AppointmentStatus};

const APPOINTMENT_COLUMNS: &str =
    "id, customer_id, professional_id, service_id, starts_at, duration_minutes, status, created_at, updated_at";

/// Conflict predicate against the other live appointments of a professional.
/// Bind layout shared by the guarded insert and the guarded reschedule:
/// `$1` professional, `$2` candidate start, `$3` candidate duration,
/// `$4` appointment id to ignore (NULL on creation, its own row on
/// reschedule).
fn conflict_clause(mode: ConflictMode) -> &'static str {
    match mode {
        ConflictMode::ExactStart => {
            r#"
            SELECT 1 FROM appointments
            WHERE professional_id = $1
              AND status <> 'canceled'
              AND id IS DISTINCT FROM $4
              AND starts_at = $2
            "#
        }
        ConflictMode::Interval => {
            r#"
            SELECT 1 FROM appointments
            WHERE professional_id = $1
              AND status <> 'canceled'
              AND id IS DISTINCT FROM $4
              AND starts_at < $2 + make_interval(mins => $3)
              AND $2 < starts_at + make_interval(mins => duration_minutes)
            "#
        }
    }
}

pub struct AppointmentRepository;

impl AppointmentRepository {
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Appointment, DatabaseError> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }

    /// Live appointments of one professional inside a half-open window,
    /// ascending. Canceled rows are filtered at the query so the availability
    /// engine never sees them. `exclude` drops one appointment from its own
    /// conflict set when rescheduling.
    pub async fn list_live_for_professional(
        pool: &PgPool,
        professional_id: Uuid,
        from: PrimitiveDateTime,
        to: PrimitiveDateTime,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Appointment>, DatabaseError> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE professional_id = $1
              AND starts_at >= $2
              AND starts_at < $3
              AND status <> 'canceled'
              AND id IS DISTINCT FROM $4
            ORDER BY starts_at
            "#
        ))
        .bind(professional_id)
        .bind(from)
        .bind(to)
        .bind(exclude)
        .fetch_all(pool)
        .await?;

        Ok(appointments)
    }

    /// The agenda listing, scoped by role at the call site: customers filter
    /// on `customer_id`, barbers on `professional_id`, admins on neither.
    pub async fn list_details(
        pool: &PgPool,
        customer_id: Option<Uuid>,
        professional_id: Option<Uuid>,
    ) -> Result<Vec<AppointmentDetails>, DatabaseError> {
        let appointments = sqlx::query_as::<_, AppointmentDetails>(
            r#"
            SELECT a.id, a.starts_at, a.duration_minutes, a.status,
                   s.name AS service_name,
                   b.full_name AS professional_name,
                   c.full_name AS customer_name
            FROM appointments a
            JOIN services s ON s.id = a.service_id
            JOIN profiles b ON b.id = a.professional_id
            JOIN profiles c ON c.id = a.customer_id
            WHERE ($1::uuid IS NULL OR a.customer_id = $1)
              AND ($2::uuid IS NULL OR a.professional_id = $2)
            ORDER BY a.starts_at
            "#,
        )
        .bind(customer_id)
        .bind(professional_id)
        .fetch_all(pool)
        .await?;

        Ok(appointments)
    }

    /// Atomic "insert unless the slot is taken": the conflict check and the
    /// insert are a single statement, with the partial unique index on
    /// (professional_id, starts_at) as backstop, so two clients racing for
    /// the same slot cannot both win.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_if_free(
        pool: &PgPool,
        customer_id: Uuid,
        professional_id: Uuid,
        service_id: Uuid,
        starts_at: PrimitiveDateTime,
        duration_minutes: i32,
        status: AppointmentStatus,
        mode: ConflictMode,
    ) -> Result<Appointment, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO appointments
                (professional_id, starts_at, duration_minutes, customer_id, service_id, status)
            SELECT $1, $2, $3, $5, $6, $7
            WHERE NOT EXISTS ({})
            RETURNING {APPOINTMENT_COLUMNS}
            "#,
            conflict_clause(mode)
        );

        sqlx::query_as::<_, Appointment>(&sql)
            .bind(professional_id)
            .bind(starts_at)
            .bind(duration_minutes)
            .bind(Option::<Uuid>::None)
            .bind(customer_id)
            .bind(service_id)
            .bind(status)
            .fetch_optional(pool)
            .await
            .map_err(DatabaseError::from_insert)?
            .ok_or(DatabaseError::SlotTaken)
    }

    /// Atomic reschedule with the same conflict discipline as creation; the
    /// appointment's own row ($4) is excluded from its conflict set.
    pub async fn reschedule_if_free(
        pool: &PgPool,
        id: Uuid,
        professional_id: Uuid,
        service_id: Uuid,
        starts_at: PrimitiveDateTime,
        duration_minutes: i32,
        mode: ConflictMode,
    ) -> Result<Appointment, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE appointments
            SET professional_id = $1,
                starts_at = $2,
                duration_minutes = $3,
                service_id = $5,
                updated_at = NOW()
            WHERE id = $4
              AND NOT EXISTS ({})
            RETURNING {APPOINTMENT_COLUMNS}
            "#,
            conflict_clause(mode)
        );

        sqlx::query_as::<_, Appointment>(&sql)
            .bind(professional_id)
            .bind(starts_at)
            .bind(duration_minutes)
            .bind(id)
            .bind(service_id)
            .fetch_optional(pool)
            .await
            .map_err(DatabaseError::from_insert)?
            .ok_or(DatabaseError::SlotTaken)
    }

    /// Soft transition only; cancellation keeps the row for history.
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, DatabaseError> {
        sqlx::query_as::<_, Appointment>(&format!(
            r#"
            UPDATE appointments
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }
}
