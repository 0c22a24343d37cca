pub mod browse;
pub mod client;
pub mod configure;
pub mod ping;
pub mod result;
pub mod session;
pub mod user;
pub mod video;

pub use result::CommandResult;
