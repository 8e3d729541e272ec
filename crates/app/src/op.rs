use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use common::ldp::{HttpLdpClient, HttpLdpClientConfig, LdpError, Proxy};
use common::prelude::{GraphAgent, Session};

use crate::state::{AppConfig, AppState};

/// Effective settings after merging flags with the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub proxy: Option<Url>,
    pub web_id: Option<String>,
    pub timeout: Option<Duration>,
    pub log_level: String,
}

/// Resolve settings.
///
/// Priority: explicit flag > config file > default.
pub fn resolve_settings(
    proxy: Option<Url>,
    web_id: Option<String>,
    log_level: Option<String>,
    config_path: Option<PathBuf>,
) -> Settings {
    let config = AppState::load(config_path)
        .map(|state| state.config)
        .unwrap_or_default();
    merge(proxy, web_id, log_level, config)
}

fn merge(
    proxy: Option<Url>,
    web_id: Option<String>,
    log_level: Option<String>,
    config: AppConfig,
) -> Settings {
    Settings {
        proxy: proxy.or(config.proxy),
        web_id: web_id.or(config.web_id),
        timeout: config.request_timeout_secs.map(Duration::from_secs),
        log_level: log_level.unwrap_or(config.log_level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            proxy: Some(Url::parse("http://localhost:8800/").unwrap()),
            web_id: Some("https://alice.example/profile/card#me".to_string()),
            request_timeout_secs: Some(5),
            log_level: "debug".to_string(),
        }
    }

    #[test]
    fn test_flags_win() {
        let proxy = Url::parse("http://proxy.example/").unwrap();
        let settings = merge(
            Some(proxy.clone()),
            Some("https://bob.example/profile/card#me".to_string()),
            Some("warn".to_string()),
            config(),
        );
        assert_eq!(settings.proxy, Some(proxy));
        assert_eq!(
            settings.web_id.as_deref(),
            Some("https://bob.example/profile/card#me")
        );
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_config_fills_gaps() {
        let settings = merge(None, None, None, config());
        assert_eq!(settings.proxy, config().proxy);
        assert_eq!(settings.web_id, config().web_id);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = resolve_settings(None, None, None, Some(PathBuf::from("/nonexistent")));
        assert!(settings.proxy.is_none());
        assert!(settings.web_id.is_none());
        assert!(settings.timeout.is_none());
        assert_eq!(settings.log_level, "info");
    }
}

#[derive(Debug, Clone)]
pub struct OpContext {
    /// Agent talking to Solid servers over HTTP
    pub agent: GraphAgent<HttpLdpClient>,
    /// Optional custom config path (defaults to ~/.wgraph)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(settings: &Settings, config_path: Option<PathBuf>) -> Result<Self, LdpError> {
        let client = HttpLdpClient::new(HttpLdpClientConfig {
            proxy: settings.proxy.clone().map(Proxy::new).unwrap_or_default(),
            timeout: settings.timeout,
        })?;
        let session = match &settings.web_id {
            Some(web_id) => Session::new(web_id.clone()),
            None => Session::anonymous(),
        };

        Ok(Self {
            agent: GraphAgent::new(client).with_session(session),
            config_path,
        })
    }

    /// The WebID the session is signed in with
    pub fn web_id(&self) -> Option<&str> {
        self.agent.session().web_id()
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
