pub mod record;
pub mod sink;
pub mod logger;

pub mod file_sink;
pub mod stderr_sink;
pub mod noop_sink;

pub mod layer;
pub mod init;
pub mod error;
pub mod env;
