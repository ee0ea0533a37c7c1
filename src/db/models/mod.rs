mod appointment;
mod profile;
mod service;
mod shop_settings;
pub mod time_formats;
mod working_hours;

pub use appointment::*;
pub use profile::*;
pub use service::*;
pub use shop_settings::*;
pub use working_hours::*;
