pub mod file_detector;
pub mod manager;
pub mod mapper;

pub use file_detector::FileType;
pub use manager::InputManager;
pub use mapper::{map_form_submission, map_form_submissions};
