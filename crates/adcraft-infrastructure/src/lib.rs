//! Persistence and environment for AdCraft.

pub mod config_service;
pub mod file_creative_repository;
pub mod memory_creative_repository;
pub mod paths;
pub mod rest_creative_repository;
pub mod secret_service;
pub mod session_gate;
pub mod storage;

pub use config_service::ConfigService;
pub use file_creative_repository::FileCreativeRepository;
pub use memory_creative_repository::InMemoryCreativeRepository;
pub use paths::{AdcraftPaths, PathError};
pub use rest_creative_repository::RestCreativeRepository;
pub use secret_service::SecretServiceImpl;
pub use session_gate::LocalSessionGate;
