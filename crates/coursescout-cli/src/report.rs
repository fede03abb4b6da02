use crate::OutputFormat;
use anyhow::Result;
use coursescout_core::CourseRecord;
use std::io::Write;

pub const SUCCESS_BANNER: &str = "COURSE SUCCESSFULLY INSERTED INTO THE IN-MEMORY STORE!";
pub const FAILURE_LINE: &str = "Failed to insert the course into the store.";

/// Print the stored course
pub fn write_success<W: Write>(out: &mut W, course: &CourseRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            let id = course
                .id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());

            writeln!(out, "{}", console::style(SUCCESS_BANNER).green().bold())?;
            writeln!(out)?;
            writeln!(out, "Course ID: {}", id)?;
            writeln!(out, "Title: {}", course.title())?;
            writeln!(out, "Instructor: {}", course.instructor())?;
            writeln!(out, "Workload: {} hours", course.duration_hours())?;
            writeln!(out, "Description: {}", course.description())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, course)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print the single line shown when the stored course cannot be read back
pub fn write_failure<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", FAILURE_LINE)?;
    Ok(())
}
