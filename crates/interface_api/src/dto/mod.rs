//! Request/Response DTOs

pub mod account;
pub mod limits;
pub mod statement;
pub mod transaction;
