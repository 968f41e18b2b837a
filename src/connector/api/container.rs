use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{CallerAuthenticator, ChatClient, SecretProvider};
use crate::{
    DailyCheckInUseCase, EnvSecretProvider, FileSecretProvider, GeneratePanicPlanUseCase,
    MockChatClient, OpenAiChatClient, StaticTokenAuthenticator,
};

pub const DEFAULT_REGION: &str = "us-central1";

pub struct ContainerConfig {
    /// Region the functions are pinned to; reported by `/health`.
    pub region: String,
    /// Answer every completion from canned responses instead of the provider.
    pub mock_llm: bool,
    /// Identity used for invocations made from the CLI.
    pub cli_caller: Option<String>,
    /// `uid:token,...` table for HTTP callers. Falls back to
    /// `SOLACE_CALLER_TOKENS` when `None`.
    pub caller_tokens: Option<String>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            mock_llm: false,
            cli_caller: None,
            caller_tokens: None,
        }
    }
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    authenticator: Arc<dyn CallerAuthenticator>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let chat_client: Arc<dyn ChatClient> = if config.mock_llm {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::new())
        } else {
            let secrets: Arc<dyn SecretProvider> = match FileSecretProvider::from_env() {
                Some(provider) => {
                    debug!("Resolving secrets from {}", provider.dir().display());
                    Arc::new(provider)
                }
                None => {
                    debug!("Resolving secrets from the environment");
                    Arc::new(EnvSecretProvider::new())
                }
            };
            let client = OpenAiChatClient::from_env(secrets);
            debug!(
                "Using completion API at {} with model {}",
                client.url(),
                client.model_name()
            );
            Arc::new(client)
        };

        let authenticator = match config.caller_tokens.as_deref() {
            Some(table) => StaticTokenAuthenticator::parse(table)?,
            None => StaticTokenAuthenticator::from_env()?,
        };

        Ok(Self::with_services(config, chat_client, Arc::new(authenticator)))
    }

    /// Assemble a container from already-built services.
    pub fn with_services(
        config: ContainerConfig,
        chat_client: Arc<dyn ChatClient>,
        authenticator: Arc<dyn CallerAuthenticator>,
    ) -> Self {
        Self {
            chat_client,
            authenticator,
            config,
        }
    }

    pub fn panic_plan_use_case(&self) -> GeneratePanicPlanUseCase {
        GeneratePanicPlanUseCase::new(self.chat_client.clone())
    }

    pub fn check_in_use_case(&self) -> DailyCheckInUseCase {
        DailyCheckInUseCase::new(self.chat_client.clone())
    }

    pub fn authenticator(&self) -> &dyn CallerAuthenticator {
        self.authenticator.as_ref()
    }

    pub fn region(&self) -> &str {
        &self.config.region
    }

    pub fn cli_caller(&self) -> Option<&str> {
        self.config.cli_caller.as_deref()
    }
}
