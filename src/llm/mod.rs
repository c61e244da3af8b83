pub mod client;
pub mod invoker;

pub use client::{ContentPart, ImageUrl, LlmClient};
pub use invoker::{ModelFailure, ModelInvoker};
