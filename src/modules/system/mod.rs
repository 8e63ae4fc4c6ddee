pub mod events;
pub mod keepalive;
