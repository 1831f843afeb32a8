pub mod client;
pub mod messages;

pub use client::{LiveBackend, LiveConnection, WsLiveClient};
pub use messages::{ClientEvent, LiveConfig, ServerEvent};
