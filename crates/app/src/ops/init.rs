use clap::Args;
use url::Url;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        // global --proxy / --web-id are persisted
        let config = AppConfig {
            proxy: ctx.agent.store().proxy().base().cloned(),
            web_id: ctx.web_id().map(str::to_string),
            request_timeout_secs: self.timeout_secs,
            ..AppConfig::default()
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let show = |value: Option<String>| value.unwrap_or_else(|| "(none)".to_string());
        let output = format!(
            "Initialized wgraph directory at: {}\n\
             - Config: {}\n\
             - Proxy: {}\n\
             - WebID: {}\n\
             - Request timeout: {}",
            state.dir.display(),
            state.config_path.display(),
            show(state.config.proxy.as_ref().map(Url::to_string)),
            show(state.config.web_id.clone()),
            show(state.config.request_timeout_secs.map(|s| format!("{}s", s))),
        );

        Ok(output)
    }
}
