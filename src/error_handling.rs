use std::fmt::Display;
use std::path::PathBuf;

pub trait ErrorType: std::error::Error + PartialEq {}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Location {
    pub file: Option<PathBuf>,
    pub line: usize
}

impl Location {
    pub fn line(line: usize) -> Self {
        Location { file: None, line }
    }

    pub fn in_file(file: PathBuf, line: usize) -> Self {
        Location { file: Some(file), line }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.file, self.line) {
            (Some(file), 0) => write!(f, "{}", file.display()),
            (Some(file), line) => write!(f, "{}:{}", file.display(), line),
            (None, line) => write!(f, "line {}", line),
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("[{location}]  {error}")]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

pub type Errors<T> = Vec<Error<T>>;
