pub mod resume;

pub use resume::{file_extension, DocumentFormat, ParsedResume, RawDocument};
