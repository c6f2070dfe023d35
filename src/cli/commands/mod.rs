mod api_key;
mod init;
mod normalize;

pub use api_key::cmd_api_key;
pub use init::cmd_init;
pub use normalize::cmd_normalize;
