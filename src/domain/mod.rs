mod student;

pub use student::{Student, StudentDraft, DOB_FORMAT};
