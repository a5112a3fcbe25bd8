use chrono::NaiveDate;
use derive_more::derive::Display;

// dates travel as YYYY-MM-DD everywhere, on the wire and in the table
pub const DOB_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Display)]
#[display("{} {} (#{})", first_name, last_name, id)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub amount_due: f64,
}

/// The mutable part of a student: everything but the store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub amount_due: f64,
}
