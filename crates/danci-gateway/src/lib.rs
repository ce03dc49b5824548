pub mod backend;
pub mod client;
pub mod prompt;
pub mod server;

pub use backend::OpenAiBackend;
pub use client::GatewayClient;
pub use server::{GatewayState, create_router, serve};
