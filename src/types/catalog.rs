//! The package catalog: base packages and optional extras.

use crate::{
    rates::RateTable,
    types::{Currency, FREE_LABEL},
};
use eyre::{WrapErr, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A base package with its price and the feature list shown on exported quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Display name, unique within the catalog.
    pub name: String,
    /// Price in reference-currency units.
    pub price: u64,
    /// Ordered feature descriptions.
    pub features: Vec<String>,
}

/// An optional extra, selectable independently of the package.
///
/// A price of zero means the extra is included at no charge and renders as `FREE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraOption {
    /// Display name, unique within the catalog.
    pub name: String,
    /// Price in reference-currency units.
    pub price: u64,
}

/// The full catalog of packages and extras, defined at configuration time and immutable for the
/// lifetime of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCatalog {
    /// Base packages.
    pub packages: Vec<Package>,
    /// Optional extras.
    pub extras: Vec<ExtraOption>,
}

impl PackageCatalog {
    /// Loads the catalog from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read catalog file: {}", path.display()))?;
        let catalog: Self = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse catalog file: {}", path.display()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Saves the catalog to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Ensures package and extra names are unique.
    pub fn validate(&self) -> eyre::Result<()> {
        for (i, package) in self.packages.iter().enumerate() {
            ensure!(
                !self.packages[..i].iter().any(|p| p.name == package.name),
                "duplicate package in catalog: {}",
                package.name
            );
        }
        for (i, extra) in self.extras.iter().enumerate() {
            ensure!(
                !self.extras[..i].iter().any(|e| e.name == extra.name),
                "duplicate extra in catalog: {}",
                extra.name
            );
        }
        Ok(())
    }

    /// Looks up a package by name.
    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Looks up an extra by name.
    pub fn extra(&self, name: &str) -> Option<&ExtraOption> {
        self.extras.iter().find(|e| e.name == name)
    }

    /// Returns the catalog with every price formatted in the given display currency.
    pub fn priced(&self, rates: &RateTable, currency: &Currency) -> PricedCatalog {
        PricedCatalog {
            currency: currency.clone(),
            packages: self
                .packages
                .iter()
                .map(|p| PricedPackage {
                    name: p.name.clone(),
                    price: p.price,
                    display_price: rates.display_price(p.price, currency),
                    features: p.features.clone(),
                })
                .collect(),
            extras: self
                .extras
                .iter()
                .map(|e| PricedExtra {
                    name: e.name.clone(),
                    price: e.price,
                    display_price: if e.price == 0 {
                        FREE_LABEL.to_string()
                    } else {
                        rates.display_price(e.price, currency)
                    },
                })
                .collect(),
        }
    }
}

impl Default for PackageCatalog {
    fn default() -> Self {
        let package = |name: &str, price: u64, features: &[&str]| Package {
            name: name.to_string(),
            price,
            features: features.iter().map(|f| f.to_string()).collect(),
        };
        let extra =
            |name: &str, price: u64| ExtraOption { name: name.to_string(), price };

        Self {
            packages: vec![
                package(
                    "Basic Package",
                    95,
                    &[
                        "1 custom landing page",
                        "Fully responsive design (desktop, tablet and mobile)",
                        "Basic SEO setup",
                        "Sticky navbar for easier navigation and better conversions",
                        "Contact form with Formspree, favicon, hosting setup and speed optimisation included",
                        "2 revisions, delivery in 2 days",
                    ],
                ),
                package(
                    "Standard Package",
                    160,
                    &[
                        "Everything in the Basic package",
                        "2 additional pages (3 pages total)",
                        "Logo design included",
                        "GA4 analytics setup with GDPR cookie banner",
                        "sitemap.xml and robots.txt included",
                        "3 revisions, delivery in 3 to 4 days",
                    ],
                ),
                package(
                    "Premium Package",
                    260,
                    &[
                        "Everything in the Standard package",
                        "2 more additional pages (5 pages total)",
                        "Full SEO with WCAG friendly accessibility improvements",
                        "Priority support",
                        "5 revisions, delivery in 4 to 6 days",
                    ],
                ),
            ],
            extras: vec![
                extra("Logo Refresh", 0),
                extra("Blog Setup", 80),
                extra("Booking System", 120),
                extra("Website Copywriting", 60),
                extra("Extra Revision Round", 25),
                extra("Priority Delivery", 50),
            ],
        }
    }
}

/// A [`PackageCatalog`] with prices formatted in a display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedCatalog {
    /// The display currency the prices are formatted in.
    pub currency: Currency,
    /// Base packages.
    pub packages: Vec<PricedPackage>,
    /// Optional extras.
    pub extras: Vec<PricedExtra>,
}

/// A [`Package`] with its price formatted in a display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedPackage {
    /// Display name.
    pub name: String,
    /// Price in reference-currency units.
    pub price: u64,
    /// Price formatted in the display currency.
    pub display_price: String,
    /// Ordered feature descriptions.
    pub features: Vec<String>,
}

/// An [`ExtraOption`] with its price formatted in a display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedExtra {
    /// Display name.
    pub name: String,
    /// Price in reference-currency units.
    pub price: u64,
    /// Price formatted in the display currency, or `FREE` for zero-price extras.
    pub display_price: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let default_catalog = PackageCatalog::default();

        let file = tempfile::NamedTempFile::new().unwrap();
        default_catalog.save_to_file(file.path()).unwrap();

        assert_eq!(default_catalog, PackageCatalog::load_from_file(file.path()).unwrap());
    }

    #[test]
    fn lookup_by_name() {
        let catalog = PackageCatalog::default();
        assert_eq!(catalog.package("Standard Package").unwrap().price, 160);
        assert_eq!(catalog.extra("Logo Refresh").unwrap().price, 0);
        assert!(catalog.package("Mystery Package").is_none());
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut catalog = PackageCatalog::default();
        catalog.extras.push(ExtraOption { name: "Logo Refresh".to_string(), price: 10 });
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn priced_view_renders_free() {
        let catalog = PackageCatalog::default();
        let priced = catalog.priced(&RateTable::fallback(), &Currency::new("USD"));

        // ceil(95 * 1.27) = 121
        assert_eq!(priced.packages[0].display_price, "$121");
        let logo = priced.extras.iter().find(|e| e.name == "Logo Refresh").unwrap();
        assert_eq!(logo.display_price, "FREE");
    }
}
