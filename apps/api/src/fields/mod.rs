// Field Extractors: pure functions over normalised résumé text.
// None of them fail; a field that cannot be found is simply absent or empty.

pub mod contact;
pub mod education;
pub mod skills;

pub use contact::{extract_email, extract_phone};
pub use education::extract_education;
pub use skills::SkillSet;
