// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::error::{ContentError, Result};

/// Environment variable holding the CMS project id.
pub const PROJECT_ID_VAR: &str = "FLIPBOOK_PROJECT_ID";
/// Environment variable holding the CMS dataset.
pub const DATASET_VAR: &str = "FLIPBOOK_DATASET";
/// Environment variable overriding the CMS API version.
pub const API_VERSION_VAR: &str = "FLIPBOOK_API_VERSION";

/// Where content is fetched from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentConfig {
    /// CMS project id.
    pub project_id: String,
    /// Dataset within the project.
    pub dataset: String,
    /// Dated API version, e.g. `2024-01-01`.
    pub api_version: String,
    /// Query the edge cache instead of the live API.
    pub use_cdn: bool,
}

impl ContentConfig {
    /// API version used when none is configured.
    pub const DEFAULT_API_VERSION: &str = "2024-01-01";

    /// Configuration for `project_id` and `dataset` with default settings.
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            api_version: Self::DEFAULT_API_VERSION.to_owned(),
            use_cdn: true,
        }
    }

    /// Reads the configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// The project id and dataset are required; empty values count as
    /// missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ContentError::MissingConfig(name))
        };
        let mut config = Self::new(required(PROJECT_ID_VAR)?, required(DATASET_VAR)?);
        if let Some(version) = lookup(API_VERSION_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_version = version;
        }
        Ok(config)
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Endpoint for document queries.
    #[must_use]
    pub fn query_endpoint(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{host}.sanity.io/v{}/data/query/{}",
            self.project_id, self.api_version, self.dataset
        )
    }

    /// Base URL of the image CDN.
    #[must_use]
    pub fn image_base(&self) -> String {
        format!(
            "https://cdn.sanity.io/images/{}/{}",
            self.project_id, self.dataset
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn reads_required_values() {
        let config =
            ContentConfig::from_lookup(vars(&[(PROJECT_ID_VAR, "abc"), (DATASET_VAR, "production")]))
                .unwrap();
        assert_eq!(config.api_version, "2024-01-01");
        assert_eq!(
            config.query_endpoint(),
            "https://abc.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
        assert_eq!(config.image_base(), "https://cdn.sanity.io/images/abc/production");
    }

    #[test]
    fn missing_or_blank_values_are_errors() {
        let err = ContentConfig::from_lookup(vars(&[(DATASET_VAR, "production")])).unwrap_err();
        assert!(matches!(err, ContentError::MissingConfig(PROJECT_ID_VAR)));

        let err = ContentConfig::from_lookup(vars(&[(PROJECT_ID_VAR, "abc"), (DATASET_VAR, "  ")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "missing configuration value FLIPBOOK_DATASET");
    }

    #[test]
    fn api_version_can_be_overridden() {
        let mut config = ContentConfig::from_lookup(vars(&[
            (PROJECT_ID_VAR, "abc"),
            (DATASET_VAR, "staging"),
            (API_VERSION_VAR, "2025-02-19"),
        ]))
        .unwrap();
        config.use_cdn = false;
        assert_eq!(
            config.query_endpoint(),
            "https://abc.api.sanity.io/v2025-02-19/data/query/staging"
        );
    }
}
