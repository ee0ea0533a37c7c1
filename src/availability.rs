//! Slot generation and conflict filtering for one professional on one day.
//!
//! Everything here is pure: the current instant is injected by the caller, so
//! identical inputs always produce identical output. Fetching the schedule
//! and the day's appointments happens in the booking module just before the
//! call.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, Duration, PrimitiveDateTime, Time};

use crate::db::{weekday_index, Appointment, WorkingHoursRule};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Weekday {0} is outside 0..=6")]
    InvalidWeekday(i16),

    #[error("More than one rule for weekday {0}")]
    DuplicateWeekday(i16),
}

#[derive(Debug, Clone, Copy)]
struct DayHours {
    opens_at: Time,
    closes_at: Time,
    is_closed: bool,
}

/// Validated weekday → opening-hours mapping, indexed 0 = Sunday.
/// A weekday without a rule behaves exactly like an `is_closed` rule.
#[derive(Debug, Clone, Default)]
pub struct WeeklySchedule {
    days: [Option<DayHours>; 7],
}

impl WeeklySchedule {
    pub fn from_rules(rules: &[WorkingHoursRule]) -> Result<Self, ScheduleError> {
        let mut days: [Option<DayHours>; 7] = [None; 7];
        for rule in rules {
            let index = usize::try_from(rule.day_of_week)
                .ok()
                .filter(|i| *i < 7)
                .ok_or(ScheduleError::InvalidWeekday(rule.day_of_week))?;
            if days[index].is_some() {
                return Err(ScheduleError::DuplicateWeekday(rule.day_of_week));
            }
            days[index] = Some(DayHours {
                opens_at: rule.opens_at,
                closes_at: rule.closes_at,
                is_closed: rule.is_closed,
            });
        }
        Ok(Self { days })
    }

    fn hours_for(&self, date: Date) -> Option<DayHours> {
        let index = weekday_index(date.weekday()) as usize;
        self.days[index].filter(|hours| !hours.is_closed)
    }
}

/// How an existing booking occupies the calendar. Exact-start reproduces the
/// original fixed-slot behavior; interval treats every appointment as
/// `[starts_at, starts_at + duration)` and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictMode {
    ExactStart,
    Interval,
}

impl std::str::FromStr for ConflictMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact_start" => Ok(ConflictMode::ExactStart),
            "interval" => Ok(ConflictMode::Interval),
            _ => Err(format!("Unknown conflict mode: {}", s)),
        }
    }
}

/// The engine's view of one live appointment.
#[derive(Debug, Clone, Copy)]
pub struct BookedSlot {
    pub starts_at: PrimitiveDateTime,
    pub duration_minutes: i32,
}

impl BookedSlot {
    fn ends_at(&self) -> PrimitiveDateTime {
        self.starts_at + Duration::minutes(self.duration_minutes as i64)
    }
}

impl From<&Appointment> for BookedSlot {
    fn from(appointment: &Appointment) -> Self {
        Self {
            starts_at: appointment.starts_at,
            duration_minutes: appointment.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotBlock {
    Past,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    #[serde(with = "crate::db::wall_clock")]
    pub starts_at: PrimitiveDateTime,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<SlotBlock>,
}

/// `Closed` is a terminal state distinct from an open day where every slot
/// happens to be blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAvailability {
    Closed,
    Open(Vec<Slot>),
}

impl DayAvailability {
    pub fn is_open(&self) -> bool {
        matches!(self, DayAvailability::Open(_))
    }

    pub fn slots(&self) -> &[Slot] {
        match self {
            DayAvailability::Closed => &[],
            DayAvailability::Open(slots) => slots,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleRequest<'a> {
    pub schedule: &'a WeeklySchedule,
    pub target_date: Date,
    pub slot_interval_minutes: u32,
    /// Width of the candidate booking, used by interval conflicts.
    pub service_duration_minutes: u32,
    pub appointments: &'a [BookedSlot],
    pub now: PrimitiveDateTime,
    pub conflict_mode: ConflictMode,
}

/// Enumerates the day's bookable slots for one professional.
///
/// Missing or closed working hours yield `Closed` rather than an error, and a
/// target date already in the past is treated as wholesale closed. Slot
/// starts run from `opens_at` in fixed steps strictly below `closes_at`; a
/// slot is available iff it is neither in the past (start <= now) nor in
/// conflict with a live appointment under the requested mode.
pub fn day_schedule(request: &ScheduleRequest) -> DayAvailability {
    let Some(hours) = request.schedule.hours_for(request.target_date) else {
        return DayAvailability::Closed;
    };
    if request.target_date < request.now.date() {
        return DayAvailability::Closed;
    }
    if request.slot_interval_minutes == 0 {
        return DayAvailability::Closed;
    }

    let step = Duration::minutes(request.slot_interval_minutes as i64);
    let service_width = Duration::minutes(request.service_duration_minutes as i64);
    let closes_at = PrimitiveDateTime::new(request.target_date, hours.closes_at);

    let mut slots = Vec::new();
    let mut starts_at = PrimitiveDateTime::new(request.target_date, hours.opens_at);
    while starts_at < closes_at {
        let blocked_by = if starts_at <= request.now {
            Some(SlotBlock::Past)
        } else if is_busy(request, starts_at, service_width) {
            Some(SlotBlock::Busy)
        } else {
            None
        };
        slots.push(Slot {
            starts_at,
            available: blocked_by.is_none(),
            blocked_by,
        });
        starts_at += step;
    }

    DayAvailability::Open(slots)
}

fn is_busy(request: &ScheduleRequest, starts_at: PrimitiveDateTime, width: Duration) -> bool {
    match request.conflict_mode {
        ConflictMode::ExactStart => request
            .appointments
            .iter()
            .any(|booked| booked.starts_at == starts_at),
        ConflictMode::Interval => {
            let ends_at = starts_at + width;
            request
                .appointments
                .iter()
                .any(|booked| booked.starts_at < ends_at && starts_at < booked.ends_at())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};
    use time::OffsetDateTime;

    fn rule(day_of_week: i16, opens_at: Time, closes_at: Time, is_closed: bool) -> WorkingHoursRule {
        WorkingHoursRule {
            day_of_week,
            opens_at,
            closes_at,
            is_closed,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    /// Monday 09:00-12:00. 2026-03-02 is a Monday, 2026-03-01 a Sunday.
    fn monday_morning() -> WeeklySchedule {
        WeeklySchedule::from_rules(&[rule(1, time!(09:00), time!(12:00), false)]).unwrap()
    }

    fn booked(starts_at: PrimitiveDateTime, duration_minutes: i32) -> BookedSlot {
        BookedSlot {
            starts_at,
            duration_minutes,
        }
    }

    fn request<'a>(
        schedule: &'a WeeklySchedule,
        appointments: &'a [BookedSlot],
        now: PrimitiveDateTime,
    ) -> ScheduleRequest<'a> {
        ScheduleRequest {
            schedule,
            target_date: date!(2026 - 03 - 02),
            slot_interval_minutes: 30,
            service_duration_minutes: 30,
            appointments,
            now,
            conflict_mode: ConflictMode::ExactStart,
        }
    }

    fn starts(availability: &DayAvailability) -> Vec<PrimitiveDateTime> {
        availability.slots().iter().map(|s| s.starts_at).collect()
    }

    #[test]
    fn empty_day_enumerates_every_slot_as_available() {
        let schedule = monday_morning();
        let result = day_schedule(&request(&schedule, &[], datetime!(2026-03-02 08:00)));

        assert_eq!(
            starts(&result),
            vec![
                datetime!(2026-03-02 09:00),
                datetime!(2026-03-02 09:30),
                datetime!(2026-03-02 10:00),
                datetime!(2026-03-02 10:30),
                datetime!(2026-03-02 11:00),
                datetime!(2026-03-02 11:30),
            ]
        );
        assert!(result.slots().iter().all(|s| s.available));
    }

    #[test]
    fn slot_starts_never_reach_closing_time() {
        let schedule = monday_morning();
        let result = day_schedule(&request(&schedule, &[], datetime!(2026-03-02 08:00)));
        let closes_at = datetime!(2026-03-02 12:00);
        assert!(result.slots().iter().all(|s| s.starts_at < closes_at));
    }

    #[test]
    fn booked_start_is_marked_busy_others_stay_free() {
        let schedule = monday_morning();
        let appointments = [booked(datetime!(2026-03-02 10:00), 30)];
        let result = day_schedule(&request(&schedule, &appointments, datetime!(2026-03-02 08:00)));

        for slot in result.slots() {
            if slot.starts_at == datetime!(2026-03-02 10:00) {
                assert_eq!(slot.blocked_by, Some(SlotBlock::Busy));
                assert!(!slot.available);
            } else {
                assert!(slot.available, "slot {:?} should be free", slot.starts_at);
            }
        }
    }

    #[test]
    fn same_day_past_slots_are_blocked_future_evaluated_normally() {
        let schedule = monday_morning();
        let result = day_schedule(&request(&schedule, &[], datetime!(2026-03-02 09:45)));

        let slots = result.slots();
        assert_eq!(slots[0].blocked_by, Some(SlotBlock::Past)); // 09:00
        assert_eq!(slots[1].blocked_by, Some(SlotBlock::Past)); // 09:30
        assert!(slots[2..].iter().all(|s| s.available)); // 10:00 onward
    }

    #[test]
    fn slot_starting_exactly_now_counts_as_past() {
        let schedule = monday_morning();
        let result = day_schedule(&request(&schedule, &[], datetime!(2026-03-02 10:00)));

        let slot = result
            .slots()
            .iter()
            .find(|s| s.starts_at == datetime!(2026-03-02 10:00))
            .unwrap();
        assert_eq!(slot.blocked_by, Some(SlotBlock::Past));
    }

    #[test]
    fn future_date_has_no_past_slots() {
        let schedule = monday_morning();
        let mut req = request(&schedule, &[], datetime!(2026-02-23 18:00));
        req.target_date = date!(2026 - 03 - 02);
        let result = day_schedule(&req);
        assert!(result
            .slots()
            .iter()
            .all(|s| s.blocked_by != Some(SlotBlock::Past)));
    }

    #[test]
    fn closed_weekday_is_closed_regardless_of_appointments() {
        let schedule =
            WeeklySchedule::from_rules(&[rule(0, time!(09:00), time!(12:00), true)]).unwrap();
        let appointments = [booked(datetime!(2026-03-01 10:00), 30)];
        let mut req = request(&schedule, &appointments, datetime!(2026-02-23 08:00));
        req.target_date = date!(2026 - 03 - 01); // Sunday
        assert_eq!(day_schedule(&req), DayAvailability::Closed);
    }

    #[test]
    fn weekday_without_rule_fails_closed() {
        let schedule = monday_morning();
        let mut req = request(&schedule, &[], datetime!(2026-03-02 08:00));
        req.target_date = date!(2026 - 03 - 03); // Tuesday, no rule
        assert_eq!(day_schedule(&req), DayAvailability::Closed);
    }

    #[test]
    fn past_target_date_is_treated_as_closed() {
        let schedule = monday_morning();
        let mut req = request(&schedule, &[], datetime!(2026-03-03 08:00));
        req.target_date = date!(2026 - 03 - 02);
        assert_eq!(day_schedule(&req), DayAvailability::Closed);
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let schedule = monday_morning();
        let appointments = [booked(datetime!(2026-03-02 10:00), 30)];
        let req = request(&schedule, &appointments, datetime!(2026-03-02 09:45));
        assert_eq!(day_schedule(&req), day_schedule(&req));
    }

    #[test]
    fn interval_mode_long_appointment_blocks_following_slot() {
        let schedule = monday_morning();
        let appointments = [booked(datetime!(2026-03-02 10:00), 60)];
        let mut req = request(&schedule, &appointments, datetime!(2026-03-02 08:00));
        req.conflict_mode = ConflictMode::Interval;

        let result = day_schedule(&req);
        let blocked: Vec<_> = result
            .slots()
            .iter()
            .filter(|s| s.blocked_by == Some(SlotBlock::Busy))
            .map(|s| s.starts_at)
            .collect();
        assert_eq!(
            blocked,
            vec![datetime!(2026-03-02 10:00), datetime!(2026-03-02 10:30)]
        );
    }

    #[test]
    fn interval_mode_long_service_collides_with_later_appointment() {
        let schedule = monday_morning();
        let appointments = [booked(datetime!(2026-03-02 10:00), 30)];
        let mut req = request(&schedule, &appointments, datetime!(2026-03-02 08:00));
        req.conflict_mode = ConflictMode::Interval;
        req.service_duration_minutes = 60;

        let result = day_schedule(&req);
        let slot_at = |t: PrimitiveDateTime| {
            result
                .slots()
                .iter()
                .find(|s| s.starts_at == t)
                .copied()
                .unwrap()
        };
        // A 60-minute cut starting 09:30 would run into the 10:00 booking.
        assert_eq!(slot_at(datetime!(2026-03-02 09:30)).blocked_by, Some(SlotBlock::Busy));
        assert_eq!(slot_at(datetime!(2026-03-02 10:00)).blocked_by, Some(SlotBlock::Busy));
        // Back-to-back is fine: 10:30 starts exactly when the booking ends.
        assert!(slot_at(datetime!(2026-03-02 10:30)).available);
        assert!(slot_at(datetime!(2026-03-02 09:00)).blocked_by.is_none());
    }

    #[test]
    fn exact_mode_ignores_durations_entirely() {
        let schedule = monday_morning();
        let appointments = [booked(datetime!(2026-03-02 10:00), 120)];
        let result = day_schedule(&request(&schedule, &appointments, datetime!(2026-03-02 08:00)));

        let busy: Vec<_> = result
            .slots()
            .iter()
            .filter(|s| s.blocked_by == Some(SlotBlock::Busy))
            .map(|s| s.starts_at)
            .collect();
        assert_eq!(busy, vec![datetime!(2026-03-02 10:00)]);
    }

    #[test]
    fn zero_interval_fails_closed_instead_of_spinning() {
        let schedule = monday_morning();
        let mut req = request(&schedule, &[], datetime!(2026-03-02 08:00));
        req.slot_interval_minutes = 0;
        assert_eq!(day_schedule(&req), DayAvailability::Closed);
    }

    #[test]
    fn duplicate_weekday_rules_are_rejected() {
        let rules = [
            rule(1, time!(09:00), time!(12:00), false),
            rule(1, time!(13:00), time!(18:00), false),
        ];
        assert_eq!(
            WeeklySchedule::from_rules(&rules).unwrap_err(),
            ScheduleError::DuplicateWeekday(1)
        );
    }

    #[test]
    fn out_of_range_weekday_is_rejected() {
        let rules = [rule(7, time!(09:00), time!(12:00), false)];
        assert_eq!(
            WeeklySchedule::from_rules(&rules).unwrap_err(),
            ScheduleError::InvalidWeekday(7)
        );
    }
}
