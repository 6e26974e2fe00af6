pub mod profile;
pub mod server;
