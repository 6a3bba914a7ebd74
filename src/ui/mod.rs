pub mod calendar;
pub mod icons;
pub mod notify;
pub mod spinner;
pub mod views;

pub use spinner::with_spinner;
