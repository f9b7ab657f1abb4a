pub mod pagination;
pub mod student;

pub use pagination::Pagination;
pub use student::{BulkPayload, Student, StudentChange, StudentPatch};
