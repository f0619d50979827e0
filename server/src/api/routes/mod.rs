//! API route handlers

pub mod centre_users;
pub mod health;
