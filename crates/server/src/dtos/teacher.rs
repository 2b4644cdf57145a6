use database::entities::{subjects, teachers};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub specialization: String,
}

impl From<teachers::Model> for TeacherResponse {
    fn from(teacher: teachers::Model) -> Self {
        Self {
            id: teacher.id.to_string(),
            name: teacher.full_name(),
            email: teacher.email,
            employee_id: teacher.employee_id,
            specialization: teacher.specialization.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: String,
    pub code: String,
    pub name: String,
}

impl From<subjects::Model> for SubjectResponse {
    fn from(subject: subjects::Model) -> Self {
        Self {
            id: subject.id.to_string(),
            code: subject.code,
            name: subject.name,
        }
    }
}
