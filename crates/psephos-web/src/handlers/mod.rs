//! Route handlers. Each one translates request parameters into core types
//! and a store call; none of them hold business logic.

pub mod add;
pub mod delete;
pub mod export;
pub mod list;
