pub mod conflict;
pub mod days;
pub mod schedule;
pub mod session;

pub use conflict::{ConflictChecker, ConflictError, ConflictResult};
pub use days::DayOfWeek;
pub use schedule::{Recurrence, TimeRange};
pub use session::{Session, SessionId, SessionStatus, SubjectId, TeacherId, TeacherStatus};
