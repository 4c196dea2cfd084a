//! # Data Transfer Objects
//!
//! ユースケースへの入力

pub mod availability_query;
