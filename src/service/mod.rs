pub mod dao_service;
pub mod repository;
