//! Request and response DTOs.

mod user_dto;

pub use user_dto::*;
