pub mod avatar;
pub mod faculty;
pub mod student;

pub use avatar::{AvatarService, AvatarUpload, avatar_service};
pub use faculty::{FacultyService, faculty_service};
pub use student::{RemovedStudent, StudentService, student_service};
