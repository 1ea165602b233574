pub mod calendar;
pub mod keyword;
