//! User-account service: registration, login and account CRUD over HTTP,
//! backed by Postgres.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod users;
