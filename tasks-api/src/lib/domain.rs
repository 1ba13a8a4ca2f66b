pub mod login;
pub mod task;
pub mod user;
