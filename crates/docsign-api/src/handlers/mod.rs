pub mod files;
pub mod forms;
pub mod resend;
pub mod sign;
pub mod upload;
