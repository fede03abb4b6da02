pub mod error;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use record::{CourseId, CourseRecord};
pub use store::{CourseStore, MemoryStore, Table};
