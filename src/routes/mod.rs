pub mod assessments;

pub mod auth;

pub mod files;

pub mod frontend;

pub mod leetcode;

pub mod presentation_questions;

pub mod reviews;

pub mod system;

pub mod users;

pub use assessments::configure_assessment_routes;
pub use auth::configure_auth_routes;
pub use files::configure_file_routes;
pub use frontend::configure_frontend_routes;
pub use leetcode::configure_leetcode_routes;
pub use presentation_questions::configure_presentation_question_routes;
pub use reviews::configure_review_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
