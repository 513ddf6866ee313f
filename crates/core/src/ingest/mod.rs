pub mod mapper;
pub mod provider;
pub mod types;
