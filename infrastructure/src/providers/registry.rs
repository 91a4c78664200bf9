//! Transport lookup table keyed on the provider tag

use super::{OpenAiCompatTransport, ProviderTransport, default_base_url};
use relay_domain::Provider;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry resolving a provider tag to its transport
pub struct TransportRegistry {
    transports: HashMap<Provider, Arc<dyn ProviderTransport>>,
}

impl TransportRegistry {
    pub fn new() -> Self {
        Self {
            transports: HashMap::new(),
        }
    }

    /// Registry with every supported provider at its default base URL
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for provider in Provider::all() {
            registry.insert(Arc::new(OpenAiCompatTransport::new(
                provider,
                default_base_url(provider),
            )));
        }
        registry
    }

    /// Registry with per-provider base URL overrides applied on top of the
    /// defaults
    pub fn with_base_urls(overrides: &HashMap<Provider, String>) -> Self {
        let mut registry = Self::new();
        for provider in Provider::all() {
            let base_url = overrides
                .get(&provider)
                .map(String::as_str)
                .unwrap_or_else(|| default_base_url(provider));
            registry.insert(Arc::new(OpenAiCompatTransport::new(provider, base_url)));
        }
        registry
    }

    /// Register a transport, replacing any previous one for the same tag
    pub fn insert(&mut self, transport: Arc<dyn ProviderTransport>) {
        self.transports.insert(transport.provider(), transport);
    }

    pub fn get(&self, provider: Provider) -> Option<&dyn ProviderTransport> {
        self.transports.get(&provider).map(Arc::as_ref)
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_provider() {
        let registry = TransportRegistry::with_defaults();
        for provider in Provider::all() {
            let transport = registry.get(provider).unwrap();
            assert_eq!(transport.provider(), provider);
        }
    }

    #[test]
    fn test_insert_replaces_existing_transport() {
        let mut registry = TransportRegistry::with_defaults();
        registry.insert(Arc::new(OpenAiCompatTransport::new(
            Provider::OpenAi,
            "http://localhost:9999/v1",
        )));
        assert!(registry.get(Provider::OpenAi).is_some());
    }

    #[test]
    fn test_base_url_overrides_apply() {
        let mut overrides = HashMap::new();
        overrides.insert(Provider::Gemini, "http://localhost:1234".to_string());
        let registry = TransportRegistry::with_base_urls(&overrides);
        assert!(registry.get(Provider::Gemini).is_some());
        assert!(registry.get(Provider::Claude).is_some());
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = TransportRegistry::new();
        assert!(registry.get(Provider::OpenAi).is_none());
    }
}
