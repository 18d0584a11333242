use crate::domain::model::{PostId, Reaction};
use crate::domain::ports::{ConfigProvider, ReactionNotifier};
use crate::utils::error::{ReactionError, Result};
use crate::utils::validation::{validate_endpoint_path, validate_url};
use async_trait::async_trait;
use reqwest::{redirect, Client};
use url::Url;

/// Posts `post_id=<id>` to the forum's `/like` and `/dislike` endpoints.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    like_url: Url,
    dislike_url: Url,
}

impl HttpNotifier {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        validate_url("server_url", config.server_url())?;
        validate_endpoint_path("like_path", config.like_path())?;
        validate_endpoint_path("dislike_path", config.dislike_path())?;

        let base = parse_url("server_url", config.server_url(), None)?;
        let like_url = parse_url("like_path", config.like_path(), Some(&base))?;
        let dislike_url = parse_url("dislike_path", config.dislike_path(), Some(&base))?;

        // The forum answers with a redirect to a page that needs a session;
        // following it would turn a recorded reaction into an error.
        let mut builder = Client::builder().redirect(redirect::Policy::none());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!("Notifier endpoints: like={} dislike={}", like_url, dislike_url);

        Ok(Self {
            client,
            like_url,
            dislike_url,
        })
    }

    pub fn endpoint(&self, reaction: Reaction) -> &Url {
        match reaction {
            Reaction::Like => &self.like_url,
            Reaction::Dislike => &self.dislike_url,
        }
    }
}

fn parse_url(field: &str, value: &str, base: Option<&Url>) -> Result<Url> {
    let parsed = match base {
        Some(base) => base.join(value),
        None => Url::parse(value),
    };
    parsed.map_err(|e| ReactionError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl ReactionNotifier for HttpNotifier {
    async fn notify(&self, post_id: &PostId, reaction: Reaction) -> Result<()> {
        let url = self.endpoint(reaction).clone();
        tracing::debug!("POST {} post_id={}", url, post_id);

        let response = self
            .client
            .post(url)
            .form(&[("post_id", post_id.as_str())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} notification response status: {}", reaction, status);

        if status.is_client_error() || status.is_server_error() {
            return Err(ReactionError::NotificationRejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct MockConfig {
        server_url: String,
        like_path: String,
        dislike_path: String,
    }

    impl MockConfig {
        fn new(server_url: &str) -> Self {
            Self {
                server_url: server_url.to_string(),
                like_path: "/like".to_string(),
                dislike_path: "/dislike".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn server_url(&self) -> &str {
            &self.server_url
        }

        fn like_path(&self) -> &str {
            &self.like_path
        }

        fn dislike_path(&self) -> &str {
            &self.dislike_path
        }

        fn request_timeout(&self) -> Option<Duration> {
            None
        }
    }

    #[test]
    fn test_endpoints_are_joined_onto_server_url() {
        let notifier = HttpNotifier::new(&MockConfig::new("http://localhost:5799/forum/")).unwrap();

        assert_eq!(
            notifier.endpoint(Reaction::Like).as_str(),
            "http://localhost:5799/like"
        );
        assert_eq!(
            notifier.endpoint(Reaction::Dislike).as_str(),
            "http://localhost:5799/dislike"
        );
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        assert!(HttpNotifier::new(&MockConfig::new("not a url")).is_err());

        let mut config = MockConfig::new("http://localhost:5799");
        config.like_path = "like".to_string();
        assert!(matches!(
            HttpNotifier::new(&config),
            Err(ReactionError::InvalidConfigValueError { .. })
        ));
    }
}
