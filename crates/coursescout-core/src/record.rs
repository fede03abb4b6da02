use serde::Serialize;
use std::fmt;

/// Identifier assigned to a course by the store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CourseId(u64);

impl CourseId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value of the id
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scraped course
///
/// A record leaves the extractor without an id. The store assigns it exactly
/// once on insert; nothing else about the record changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<CourseId>,
    title: String,
    instructor: String,
    duration_hours: String,
    description: String,
}

impl CourseRecord {
    /// Create a record that has not been stored yet
    pub fn new(
        title: impl Into<String>,
        instructor: impl Into<String>,
        duration_hours: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            instructor: instructor.into(),
            duration_hours: duration_hours.into(),
            description: description.into(),
        }
    }

    pub fn id(&self) -> Option<CourseId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    pub fn duration_hours(&self) -> &str {
        &self.duration_hours
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn assign_id(&mut self, id: CourseId) {
        debug_assert!(self.id.is_none());
        self.id = Some(id);
    }
}

/// Trim whitespace from scraped element text
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Strip the trailing hour unit from a scraped duration
///
/// `"40h"` becomes `"40"`, `" 12 h "` becomes `"12"`.
pub fn normalize_duration(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['h', 'H'])
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_id() {
        let record = CourseRecord::new("Course A", "Jane Doe", "40", "Intro to X");

        assert_eq!(record.id(), None);
        assert_eq!(record.title(), "Course A");
        assert_eq!(record.instructor(), "Jane Doe");
        assert_eq!(record.duration_hours(), "40");
        assert_eq!(record.description(), "Intro to X");
    }

    #[test]
    fn test_normalize_text_trims_both_ends() {
        assert_eq!(normalize_text(" Intro to X "), "Intro to X");
        assert_eq!(normalize_text("\n\tJane Doe\n"), "Jane Doe");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_normalize_duration_strips_unit() {
        assert_eq!(normalize_duration("40h"), "40");
        assert_eq!(normalize_duration(" 12 h "), "12");
        assert_eq!(normalize_duration("8H"), "8");
        assert_eq!(normalize_duration("16"), "16");
    }

    #[test]
    fn test_normalize_duration_never_ends_with_unit() {
        for raw in ["1h", "10hh", " 100 h\n", "h"] {
            let normalized = normalize_duration(raw);
            assert!(!normalized.ends_with('h'), "{raw:?} -> {normalized:?}");
        }
    }

    #[test]
    fn test_record_serializes_without_id_until_stored() {
        let mut record = CourseRecord::new("Course A", "Jane Doe", "40", "Intro to X");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("id").is_none());

        record.assign_id(CourseId::new(7));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["duration_hours"], "40");
    }
}
