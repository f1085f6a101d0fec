pub mod generate;
pub mod init;
pub mod library;
pub mod session;
