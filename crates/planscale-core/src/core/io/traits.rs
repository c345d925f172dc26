use crate::core::models::plan::IonPlan;
use std::error::Error;
use std::io;
use std::path::Path;

/// Defines the interface for reading and writing treatment plan records.
///
/// Implementors parse the attributes that rescaling needs into an [`IonPlan`]
/// and keep everything else in `Metadata`, so that a written plan carries the
/// untouched remainder of the original record.
pub trait PlanFile {
    /// The format-specific remainder of the record.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a plan from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    ///
    /// # Return
    ///
    /// Returns the parsed plan and the metadata needed to write it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not a valid record,
    /// or lacks a required attribute.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(IonPlan, Self::Metadata), Self::Error>;

    /// Writes a plan, merged into its metadata, to a file path.
    ///
    /// # Arguments
    ///
    /// * `plan` - The plan whose fields overwrite those of the metadata.
    /// * `metadata` - The record the plan was read from.
    /// * `path` - The path to the file to write.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan does not fit the metadata's structure or
    /// the file cannot be written.
    fn write_to_path<P: AsRef<Path>>(
        plan: &IonPlan,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error>;
}
