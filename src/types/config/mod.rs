pub mod mapper;

pub use mapper::{ConfigError, MapperConfig};
