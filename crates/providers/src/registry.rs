//! Role-addressed provider registry.
//!
//! Two roles: `chat` (summarization, suggestions, chat assistant) and an
//! optional `search` role for the resource-link endpoint. Both are
//! explicitly constructed, injected singletons — never ambient state.

use std::sync::Arc;

use fd_domain::config::LlmConfig;
use fd_domain::error::{Error, Result};

use crate::openai_compat::OpenAiCompatProvider;
use crate::traits::LlmProvider;

pub struct ProviderRegistry {
    chat: Arc<dyn LlmProvider>,
    search: Option<Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    /// Build both roles from config. The chat role is mandatory; the
    /// search role is only constructed when configured.
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        let chat: Arc<dyn LlmProvider> = Arc::new(OpenAiCompatProvider::from_config(&cfg.chat)?);
        tracing::info!(provider = %cfg.chat.id, "chat provider ready");

        let search = match &cfg.search {
            Some(search_cfg) => {
                let provider: Arc<dyn LlmProvider> =
                    Arc::new(OpenAiCompatProvider::from_config(search_cfg)?);
                tracing::info!(provider = %search_cfg.id, "search provider ready");
                Some(provider)
            }
            None => {
                tracing::info!("no search provider configured — resource lookup disabled");
                None
            }
        };

        Ok(Self { chat, search })
    }

    /// Assemble a registry from already-built providers (used by tests and
    /// embedders).
    pub fn new(chat: Arc<dyn LlmProvider>, search: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { chat, search }
    }

    pub fn chat(&self) -> Arc<dyn LlmProvider> {
        self.chat.clone()
    }

    pub fn search(&self) -> Result<Arc<dyn LlmProvider>> {
        self.search
            .clone()
            .ok_or_else(|| Error::Config("no search provider configured".into()))
    }
}
