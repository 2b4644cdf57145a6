pub mod session;
pub mod teacher;
