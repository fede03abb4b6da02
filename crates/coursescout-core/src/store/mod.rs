mod table;

pub use table::Table;

use crate::record::{CourseId, CourseRecord};
use crate::{Error, Result};

/// Keyed collection of course records
///
/// Ids start at 1 and grow by one per insert. Titles are not unique;
/// lookups return the earliest record with an exactly matching title.
pub trait CourseStore {
    /// Assign the next id to `record`, store it and return the id
    fn insert(&mut self, record: CourseRecord) -> Result<CourseId>;

    /// Find the first stored record whose title equals `title` (case-sensitive)
    fn find_by_title(&self, title: &str) -> Result<&CourseRecord>;

    /// Number of stored records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local course store backed by a [`Table`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    courses: Table<CourseRecord>,
    last_id: u64,
}

impl MemoryStore {
    /// Create an empty store; the first insert gets id 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> {
        self.courses.iter()
    }
}

impl CourseStore for MemoryStore {
    fn insert(&mut self, mut record: CourseRecord) -> Result<CourseId> {
        if let Some(id) = record.id() {
            return Err(Error::AlreadyStored(id));
        }

        self.last_id += 1;
        let id = CourseId::new(self.last_id);
        record.assign_id(id);

        tracing::debug!("Storing course {} with id {}", record.title(), id);
        self.courses.add(record);

        Ok(id)
    }

    fn find_by_title(&self, title: &str) -> Result<&CourseRecord> {
        self.courses
            .query(|course| course.title() == title)
            .next()
            .ok_or_else(|| Error::NotFound(title.to_string()))
    }

    fn len(&self) -> usize {
        self.courses.len()
    }
}
