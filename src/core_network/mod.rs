pub mod data_channel;
pub mod error;
pub mod network;
pub mod port;
