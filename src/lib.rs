//! trackyrs - An anime and manga tracking backend.
//!
//! This crate provides the building blocks of the Trackyrs service:
//! - A local catalog of anime, manga, characters, people, producers and
//!   magazines mirrored from the Jikan REST API
//! - A JSON HTTP API for browsing the catalog and tracking personal
//!   watch/read progress
//! - A resumable scraper that keeps the catalog in sync

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod jikan;
pub mod logging;
pub mod model;
pub mod repository;
pub mod service;
