use crate::domain::{DOB_FORMAT, Student, StudentDraft};
use crate::error::ApiError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// row shape of the `student` table
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct DbStudent {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub amount_due: f64,
}

// what goes out over the wire
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JsonStudent {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub amount_due: f64,
}

// what POST and PUT accept; every field is required
#[derive(Deserialize, Debug, Clone)]
pub struct StudentPayload {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub amount_due: f64,
}

impl From<DbStudent> for Student {
    fn from(db_student: DbStudent) -> Self {
        Student {
            id: db_student.id,
            first_name: db_student.first_name,
            last_name: db_student.last_name,
            dob: db_student.dob,
            amount_due: db_student.amount_due,
        }
    }
}

impl From<&Student> for JsonStudent {
    fn from(student: &Student) -> Self {
        JsonStudent {
            id: student.id,
            first_name: student.first_name.to_owned(),
            last_name: student.last_name.to_owned(),
            dob: student.dob.format(DOB_FORMAT).to_string(),
            amount_due: student.amount_due,
        }
    }
}

impl TryFrom<StudentPayload> for StudentDraft {
    type Error = ApiError;

    fn try_from(payload: StudentPayload) -> Result<Self, Self::Error> {
        let dob = parse_dob(&payload.dob)?;

        Ok(StudentDraft {
            first_name: payload.first_name,
            last_name: payload.last_name,
            dob,
            amount_due: payload.amount_due,
        })
    }
}

pub fn parse_dob(raw: &str) -> Result<NaiveDate, ApiError> {
    // chrono's %Y also takes signs, short years and leading blanks; only four digit years pass
    if !has_dob_shape(raw) {
        return Err(ApiError::MalformedInput(format!(
            "dob {:?} is not YYYY-MM-DD",
            raw
        )));
    }

    NaiveDate::parse_from_str(raw, DOB_FORMAT)
        .map_err(|e| ApiError::MalformedInput(format!("dob {:?} is not YYYY-MM-DD: {}", raw, e)))
}

// year is exactly four digits, month and day one or two
fn has_dob_shape(raw: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    let mut parts = raw.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            year.len() == 4
                && (1..=2).contains(&month.len())
                && (1..=2).contains(&day.len())
                && all_digits(year)
                && all_digits(month)
                && all_digits(day)
        }
        _ => false,
    }
}

// only plain decimal digits name a student, "-1" or "+1" never match the route
pub fn parse_student_id(raw: &str) -> Result<i64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::UnmatchedRoute(raw.to_owned()));
    }

    // digits that don't fit the id column still match the route; the store can't look them up
    raw.parse::<i64>()
        .map_err(|e| ApiError::MalformedInput(format!("student id {} is out of range: {}", raw, e)))
}
