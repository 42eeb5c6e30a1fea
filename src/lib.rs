//! Generic CRUD scaffolding for persistence-backed services.
//!
//! Entities implement [`resource::models::Entity`], storage backends implement
//! [`dao::repository::GenericDao`] and services implement
//! [`service::repository::GenericService`]. The [`testing`] module holds the
//! conformance checks every service implementation is expected to pass.

pub mod dao;
pub mod errors;
pub mod resource;
pub mod sample;
pub mod service;
pub mod setup;
pub mod testing;
pub mod user;
