pub mod submission;

pub use submission::{FieldEntry, FormType, NewSubmission, Submission};
