pub mod content;
pub mod tag;
pub mod user;
