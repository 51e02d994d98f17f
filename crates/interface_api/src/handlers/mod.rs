//! Request handlers

pub mod accounts;
pub mod health;
pub mod interest;
pub mod limits;
pub mod statements;
pub mod transactions;
pub mod transfers;
