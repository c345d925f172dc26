use std::path::PathBuf;

pub struct DefaultsConfig {
    pub output: PathBuf,
    pub stamp_datetime: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("output.dcm"),
            stamp_datetime: true,
        }
    }
}
