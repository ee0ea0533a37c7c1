mod appointment_repository;
mod profile_repository;
mod service_repository;
mod settings_repository;
mod working_hours_repository;

pub use appointment_repository::AppointmentRepository;
pub use profile_repository::ProfileRepository;
pub use service_repository::ServiceRepository;
pub use settings_repository::SettingsRepository;
pub use working_hours_repository::WorkingHoursRepository;
