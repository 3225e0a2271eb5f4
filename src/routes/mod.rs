pub mod auth;

pub mod students;

pub mod submissions;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use frontend::configure_frontend_routes;
pub use students::configure_student_routes;
pub use submissions::configure_submission_routes;
