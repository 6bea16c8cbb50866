//! Persistence and filesystem layer for RADIX.

pub mod config_service;
pub mod dto;
pub mod export_writer;
pub mod paths;
pub mod storage;
pub mod toml_user_repository;

pub use crate::config_service::ConfigService;
pub use crate::export_writer::FileExporter;
pub use crate::paths::{DataLayout, RadixPaths};
pub use crate::toml_user_repository::TomlUserRepository;
