use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};

use crate::app_state::AppState;
use crate::availability::{day_schedule, BookedSlot, ScheduleRequest, Slot, WeeklySchedule};
use crate::db::{
    Appointment, AppointmentDetails, AppointmentRepository, AppointmentStatus, NewAppointment,
    Profile, ProfileRepository, RescheduleAppointment, Service, ServiceRepository,
    WorkingHoursRepository,
};
use crate::error::{AppError, AppResult};
use crate::identity::CurrentUser;
use crate::mailer::AppointmentEmail;

/// Shop-local wall clock, matching the frame appointments are stored in.
fn wall_clock_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}

async fn load_active_service(state: &AppState, id: Uuid) -> AppResult<Service> {
    let service = ServiceRepository::get(&state.db, id).await?;
    if !service.active {
        return Err(AppError::Validation(
            "This service is no longer offered".into(),
        ));
    }
    Ok(service)
}

async fn load_professional(state: &AppState, id: Uuid) -> AppResult<Profile> {
    let profile = ProfileRepository::get(&state.db, id).await?;
    if !profile.role.is_bookable() {
        return Err(AppError::Validation(
            "Selected professional does not take bookings".into(),
        ));
    }
    Ok(profile)
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub professional_id: Uuid,
    pub service_id: Uuid,
    #[serde(with = "crate::db::calendar_date")]
    pub date: Date,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    #[serde(with = "crate::db::calendar_date")]
    pub date: Date,
    pub open: bool,
    pub slots: Vec<Slot>,
}

/// The day grid the booking screen renders: every slot between opening and
/// closing, annotated with whether it can still be picked.
pub async fn day_availability(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let service = load_active_service(&state, query.service_id).await?;
    let professional = load_professional(&state, query.professional_id).await?;

    let rules = WorkingHoursRepository::list(&state.db).await?;
    let schedule = WeeklySchedule::from_rules(&rules)
        .map_err(|err| AppError::InternalServerError(err.to_string()))?;

    let day_start = PrimitiveDateTime::new(query.date, Time::MIDNIGHT);
    let day_end = day_start + Duration::days(1);
    let appointments = AppointmentRepository::list_live_for_professional(
        &state.db,
        professional.id,
        day_start,
        day_end,
        None,
    )
    .await?;
    let booked: Vec<BookedSlot> = appointments.iter().map(BookedSlot::from).collect();

    let booking = &state.env.booking;
    let availability = day_schedule(&ScheduleRequest {
        schedule: &schedule,
        target_date: query.date,
        slot_interval_minutes: booking.slot_interval_minutes,
        service_duration_minutes: service.duration_minutes.max(0) as u32,
        appointments: &booked,
        now: wall_clock_now(),
        conflict_mode: booking.conflict_mode,
    });

    Ok(Json(AvailabilityResponse {
        date: query.date,
        open: availability.is_open(),
        slots: availability.slots().to_vec(),
    }))
}

pub async fn create_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<NewAppointment>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let service = load_active_service(&state, payload.service_id).await?;
    let professional = load_professional(&state, payload.professional_id).await?;

    if payload.starts_at <= wall_clock_now() {
        return Err(AppError::Validation("Cannot book a time in the past".into()));
    }

    let booking = &state.env.booking;
    let status = if booking.auto_confirm {
        AppointmentStatus::Confirmed
    } else {
        AppointmentStatus::Pending
    };

    let appointment = AppointmentRepository::create_if_free(
        &state.db,
        user.0.id,
        professional.id,
        service.id,
        payload.starts_at,
        service.duration_minutes,
        status,
        booking.conflict_mode,
    )
    .await?;

    // Creation already succeeded; the confirmation is fire-and-forget.
    state.mailer.send_appointment_confirmation(AppointmentEmail {
        customer_name: user.0.display_name().to_string(),
        customer_email: user.0.email.clone(),
        professional_name: professional.full_name.clone(),
        service_name: service.name.clone(),
        starts_at: appointment.starts_at,
    });

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Role-scoped agenda: customers see their own bookings, barbers the ones
/// they will work, admins everything.
pub async fn list_bookings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<AppointmentDetails>>> {
    let (customer_id, professional_id) = match user.0.role {
        crate::db::ProfileRole::Customer => (Some(user.0.id), None),
        crate::db::ProfileRole::Barber => (None, Some(user.0.id)),
        crate::db::ProfileRole::Admin => (None, None),
    };

    let appointments =
        AppointmentRepository::list_details(&state.db, customer_id, professional_id).await?;
    Ok(Json(appointments))
}

fn authorize_mutation(user: &CurrentUser, appointment: &Appointment) -> AppResult<()> {
    if appointment.customer_id == user.0.id || user.0.role.is_staff() {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "Not allowed to modify this appointment".into(),
        ))
    }
}

pub async fn reschedule_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleAppointment>,
) -> AppResult<Json<Appointment>> {
    let existing = AppointmentRepository::get(&state.db, id).await?;
    authorize_mutation(&user, &existing)?;

    if existing.status == AppointmentStatus::Canceled {
        return Err(AppError::Validation(
            "Canceled appointments cannot be rescheduled".into(),
        ));
    }

    let service_id = payload.service_id.unwrap_or(existing.service_id);
    let professional_id = payload.professional_id.unwrap_or(existing.professional_id);
    let starts_at = payload.starts_at.unwrap_or(existing.starts_at);

    let service = load_active_service(&state, service_id).await?;
    let professional = load_professional(&state, professional_id).await?;

    if starts_at <= wall_clock_now() {
        return Err(AppError::Validation(
            "Cannot move an appointment into the past".into(),
        ));
    }

    let appointment = AppointmentRepository::reschedule_if_free(
        &state.db,
        existing.id,
        professional.id,
        service.id,
        starts_at,
        service.duration_minutes,
        state.env.booking.conflict_mode,
    )
    .await?;

    Ok(Json(appointment))
}

/// Soft cancel; the row survives for history. Calling it on an already
/// canceled appointment is a no-op.
pub async fn cancel_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Appointment>> {
    let existing = AppointmentRepository::get(&state.db, id).await?;
    authorize_mutation(&user, &existing)?;

    if existing.status == AppointmentStatus::Canceled {
        return Ok(Json(existing));
    }

    let appointment =
        AppointmentRepository::update_status(&state.db, id, AppointmentStatus::Canceled).await?;
    Ok(Json(appointment))
}
