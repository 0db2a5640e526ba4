pub mod error;
pub mod openai;
pub mod redis;
pub mod requests;
pub mod spec;
pub mod suppliers;
