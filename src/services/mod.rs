pub mod auth;
pub mod students;
pub mod submissions;

pub use auth::AuthService;
pub use students::StudentService;
pub use submissions::SubmissionService;
