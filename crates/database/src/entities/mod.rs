pub mod sessions;
pub mod subject_teachers;
pub mod subjects;
pub mod teachers;
