use url::Url;

/// Rewrites resource URIs before they go on the wire.
///
/// Browsers can't talk to arbitrary Solid servers without CORS support, so
/// the wallet routes requests through `{base}/proxy?url={uri}`. Without a
/// base the URI is used as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proxy {
    base: Option<Url>,
}

impl Proxy {
    pub fn new(base: Url) -> Self {
        Self { base: Some(base) }
    }

    pub fn direct() -> Self {
        Self { base: None }
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    pub fn resolve(&self, uri: &str) -> Result<Url, url::ParseError> {
        // validate the target even when it ends up in a query string
        let target = Url::parse(uri)?;
        match &self.base {
            Some(base) => {
                let mut proxied = base.clone();
                proxied
                    .path_segments_mut()
                    .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
                    .pop_if_empty()
                    .push("proxy");
                proxied.set_query(None);
                proxied.query_pairs_mut().append_pair("url", target.as_str());
                Ok(proxied)
            }
            None => Ok(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_passthrough() {
        let proxy = Proxy::direct();
        let url = proxy.resolve("https://alice.example/storage/a").unwrap();
        assert_eq!(url.as_str(), "https://alice.example/storage/a");
    }

    #[test]
    fn test_proxied() {
        let proxy = Proxy::new(Url::parse("http://localhost:8111/").unwrap());
        let url = proxy
            .resolve("https://alice.example/profile/card#me")
            .unwrap();

        assert_eq!(url.path(), "/proxy");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, "https://alice.example/profile/card#me");
    }

    #[test]
    fn test_proxied_under_path() {
        for base in ["https://gw.example/wallet", "https://gw.example/wallet/"] {
            let proxy = Proxy::new(Url::parse(base).unwrap());
            let url = proxy.resolve("https://alice.example/card").unwrap();
            assert_eq!(url.host_str(), Some("gw.example"));
            assert_eq!(url.path(), "/wallet/proxy");
            assert_eq!(
                url.query_pairs().collect::<Vec<_>>(),
                vec![("url".into(), "https://alice.example/card".into())]
            );
        }
    }

    #[test]
    fn test_rejects_relative() {
        assert!(Proxy::direct().resolve("storage/a").is_err());
    }
}
