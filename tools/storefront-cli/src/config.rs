//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::InMemoryCatalog;
use storefront_commerce::checkout::SimulatedGateway;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Store presentation.
    #[serde(default)]
    pub store: StoreConfig,

    /// Where products come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Payment simulation.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Terminal output.
    #[serde(default)]
    pub output: OutputConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Build the catalog this config points at.
    ///
    /// Relative catalog paths are resolved against `base_dir`.
    pub fn load_catalog(&self, base_dir: &Path) -> Result<InMemoryCatalog> {
        match &self.catalog.path {
            Some(path) => {
                let resolved = base_dir.join(path);
                InMemoryCatalog::load(&resolved)
                    .with_context(|| format!("Failed to load catalog: {}", resolved.display()))
            }
            None => Ok(InMemoryCatalog::demo()),
        }
    }

    /// Build the payment gateway this config describes.
    pub fn gateway(&self) -> SimulatedGateway {
        let gateway = SimulatedGateway::new()
            .with_processing_delay(Duration::from_millis(self.checkout.processing_delay_ms));
        if self.checkout.decline_payments {
            gateway.declining(self.checkout.decline_reason.clone())
        } else {
            gateway
        }
    }
}

/// Store presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store name shown in headers.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Storefront".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML or JSON catalog file. The built-in demo catalog is used if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Payment simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Simulated processing time before a charge is confirmed.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,

    /// Decline every card, to exercise the failure path.
    #[serde(default)]
    pub decline_payments: bool,

    /// Reason reported for declined cards.
    #[serde(default = "default_decline_reason")]
    pub decline_reason: String,
}

fn default_processing_delay_ms() -> u64 {
    2000
}

fn default_decline_reason() -> String {
    "Your card was declined.".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
            decline_payments: false,
            decline_reason: default_decline_reason(),
        }
    }
}

/// Terminal output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Use colors when the terminal supports them.
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Storefront configuration

[store]
name = "{name}"

[catalog]
# path = "catalog.toml"

[checkout]
processing_delay_ms = 2000
decline_payments = false

[output]
color = true
"#,
        name = name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config("Test Shop")).unwrap();
        assert_eq!(config.store.name, "Test Shop");
        assert!(config.catalog.path.is_none());
        assert_eq!(config.checkout.processing_delay_ms, 2000);
        assert!(!config.checkout.decline_payments);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.name, "Storefront");
        assert!(config.output.color);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        std::fs::write(
            &path,
            r#"{"checkout": {"decline_payments": true, "processing_delay_ms": 0}}"#,
        )
        .unwrap();

        let loaded = StorefrontConfig::load(path.to_str().unwrap()).unwrap();
        assert!(loaded.checkout.decline_payments);
        assert_eq!(loaded.checkout.processing_delay_ms, 0);
        assert_eq!(loaded.store.name, "Storefront");
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[checkout\nprocessing_delay_ms = 1").unwrap();

        let err = StorefrontConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_load_catalog_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("catalog.toml")).unwrap();
        file.write_all(b"[[products]]\nid = \"x\"\nname = \"X\"\nprice = 3.5\nstock_count = 2\n")
            .unwrap();

        let config: StorefrontConfig =
            toml::from_str("[catalog]\npath = \"catalog.toml\"\n").unwrap();
        let catalog = config.load_catalog(dir.path()).unwrap();

        use storefront_commerce::catalog::CatalogProvider;
        assert_eq!(catalog.products().len(), 1);
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let config: StorefrontConfig =
            toml::from_str("[catalog]\npath = \"nope.toml\"\n").unwrap();
        assert!(config.load_catalog(Path::new("/tmp")).is_err());
    }
}
