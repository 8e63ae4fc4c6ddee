pub mod panel;
pub mod server;
pub mod system;
