use std::{collections::HashMap, sync::Arc};

use folio_di::Build;
use folio_models::Sensitive;
use folio_shared_contracts::secret::SecretStoreService;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Build)]
pub struct SecretStoreServiceImpl {
    config: SecretStoreServiceConfig,
}

/// Secret names are matched case-insensitively against `env` and `values`.
#[derive(Debug, Clone)]
pub struct SecretStoreServiceConfig {
    linked_resource_prefix: Arc<str>,
    env: Arc<HashMap<String, String>>,
    values: Arc<HashMap<String, Sensitive<String>>>,
}

impl SecretStoreServiceConfig {
    /// - `linked_resource_prefix`: prefix of the environment variables the
    ///   deployment platform publishes linked resources in, e.g. `SST_RESOURCE_`
    /// - `env`: secret name -> fallback environment variable
    /// - `values`: secret name -> inline value
    pub fn new(
        linked_resource_prefix: impl Into<Arc<str>>,
        env: impl IntoIterator<Item = (String, String)>,
        values: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            linked_resource_prefix: linked_resource_prefix.into(),
            env: Arc::new(
                env.into_iter()
                    .map(|(name, var)| (name.to_lowercase(), var))
                    .collect(),
            ),
            values: Arc::new(
                values
                    .into_iter()
                    .map(|(name, value)| (name.to_lowercase(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl SecretStoreService for SecretStoreServiceImpl {
    fn get(&self, name: String) -> Option<Sensitive<String>> {
        let linked = std::env::var(format!("{}{name}", self.config.linked_resource_prefix))
            .ok()
            .and_then(|raw| match parse_linked_resource(&raw) {
                Some(value) => Some(value),
                None => {
                    warn!(%name, "Ignoring malformed linked resource");
                    None
                }
            });
        if let Some(value) = linked {
            debug!(%name, "Secret resolved from linked resource");
            return Some(value.into());
        }

        let key = name.to_lowercase();

        let fallback = self
            .config
            .env
            .get(&key)
            .and_then(|var| std::env::var(var).ok())
            .filter(|value| !value.is_empty());
        if let Some(value) = fallback {
            debug!(%name, "Secret resolved from environment");
            return Some(value.into());
        }

        self.config
            .values
            .get(&key)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

/// Extracts the secret from a linked resource payload of the form
/// `{"value": "..."}`.
fn parse_linked_resource(raw: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct LinkedResource {
        value: String,
    }

    serde_json::from_str::<LinkedResource>(raw)
        .ok()
        .map(|resource| resource.value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_sut(env: &[(&str, &str)], values: &[(&str, &str)]) -> SecretStoreServiceImpl {
        SecretStoreServiceImpl {
            config: SecretStoreServiceConfig::new(
                "FOLIO_TEST_RESOURCE_",
                env.iter().map(|&(name, var)| (name.into(), var.into())),
                values.iter().map(|&(name, value)| (name.into(), value.into())),
            ),
        }
    }

    #[test]
    fn parse_linked_resource_value() {
        assert_eq!(
            parse_linked_resource(r#"{"value":"re_123","type":"sst.sst.Secret"}"#),
            Some("re_123".into())
        );
        assert_eq!(parse_linked_resource(r#"{"value":""}"#), None);
        assert_eq!(parse_linked_resource("re_123"), None);
    }

    #[test]
    fn inline_value() {
        // Arrange
        let sut = make_sut(&[], &[("InlineOnlyKey", "re_inline")]);

        // Act
        let result = sut.get("InlineOnlyKey".into());

        // Assert
        assert_eq!(result.map(Sensitive::into_inner), Some("re_inline".into()));
    }

    #[test]
    fn names_are_case_insensitive() {
        let sut = make_sut(&[], &[("resendapikey", "re_inline")]);

        assert_eq!(
            sut.get("ResendApiKey".into()).map(Sensitive::into_inner),
            Some("re_inline".into())
        );
    }

    #[test]
    fn empty_inline_value_is_missing() {
        let sut = make_sut(&[], &[("EmptyKey", "")]);

        assert_eq!(sut.get("EmptyKey".into()), None);
    }

    #[test]
    fn missing() {
        let sut = make_sut(&[("MissingKey", "FOLIO_TEST_SECRET_THAT_IS_NEVER_SET")], &[]);

        assert_eq!(sut.get("MissingKey".into()), None);
    }

    #[test]
    fn resolution_order() {
        // Arrange
        let sut = make_sut(
            &[("OrderKey", "FOLIO_TEST_ORDER_KEY")],
            &[("OrderKey", "from-config")],
        );

        // Act
        std::env::set_var("FOLIO_TEST_ORDER_KEY", "from-env");
        let from_env = sut.get("OrderKey".into());

        std::env::set_var("FOLIO_TEST_RESOURCE_OrderKey", r#"{"value":"from-resource"}"#);
        let from_resource = sut.get("OrderKey".into());

        std::env::remove_var("FOLIO_TEST_RESOURCE_OrderKey");
        std::env::remove_var("FOLIO_TEST_ORDER_KEY");
        let from_config = sut.get("OrderKey".into());

        // Assert
        assert_eq!(from_env.map(Sensitive::into_inner), Some("from-env".into()));
        assert_eq!(
            from_resource.map(Sensitive::into_inner),
            Some("from-resource".into())
        );
        assert_eq!(
            from_config.map(Sensitive::into_inner),
            Some("from-config".into())
        );
    }
}
