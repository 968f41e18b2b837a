pub mod http;
mod mock_chat_client;
mod openai_chat_client;
mod secret_providers;
mod static_token_authenticator;

pub use mock_chat_client::*;
pub use openai_chat_client::*;
pub use secret_providers::*;
pub use static_token_authenticator::*;
