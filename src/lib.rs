//! Follow suggestions for a music-sharing social network.
//!
//! Computes "users you might want to follow" by expanding the social graph to
//! degree-2 connections and ordering the candidates by how closely their
//! music taste (averaged audio features of liked songs) matches the querying
//! user's. Also provides the single-row profile lookup backing user pages.
//!
//! Everything here is a read: callers hand in a [`sqlx::SqlitePool`] and get
//! typed results back. HTTP handling and authentication live upstream.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::suggestions::get_suggest_follow;
pub use services::users::get_user_data;
