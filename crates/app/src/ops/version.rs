use std::convert::Infallible;

use clap::Args;

use common::build_info;

#[derive(Args, Debug, Clone)]
pub struct Version;

#[async_trait::async_trait]
impl crate::op::Op for Version {
    type Error = Infallible;
    type Output = String;

    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(build_info!().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::op::{Op, OpContext, Settings};

    #[tokio::test]
    async fn test_reports_this_binary() {
        let settings = Settings {
            proxy: None,
            web_id: None,
            timeout: None,
            log_level: "info".to_string(),
        };
        let ctx = OpContext::new(&settings, None).unwrap();

        let output = Version.execute(&ctx).await.unwrap();
        assert_eq!(output, format!("wallet-graph v{}", env!("CARGO_PKG_VERSION")));
    }
}
