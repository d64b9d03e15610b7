pub mod admin;
pub mod contact;
pub mod project;
pub mod resume;

pub use admin::AdminCredential;
pub use contact::Contact;
pub use project::{NewProject, Project};
pub use resume::Resume;
