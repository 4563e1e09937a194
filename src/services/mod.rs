pub mod journal;
pub mod migration;
pub mod server;
