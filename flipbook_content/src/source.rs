// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::future::{Future, ready};

use serde_json::Value;

use crate::error::{ContentError, Result};

/// Where zine documents come from.
///
/// Implementations run the CMS queries and return raw JSON; decoding and image
/// resolution happen in [`BookLoader`](crate::BookLoader). Only documents of
/// the zine type are expected.
pub trait DocumentSource {
    /// The zine whose slug is `slug`, or `None` if there is none.
    fn fetch_zine(&self, slug: &str) -> impl Future<Output = Result<Option<Value>>>;

    /// Every zine that has a slug.
    fn fetch_zines(&self) -> impl Future<Output = Result<Vec<Value>>>;
}

/// An in-memory [`DocumentSource`].
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    docs: Vec<Value>,
    failure: Option<String>,
}

impl StaticSource {
    /// Source serving `docs`.
    #[must_use]
    pub fn new(docs: Vec<Value>) -> Self {
        Self {
            docs,
            failure: None,
        }
    }

    /// Source whose every request fails with a transport error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            docs: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// Adds a document.
    pub fn push(&mut self, doc: Value) {
        self.docs.push(doc);
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(ContentError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

fn slug_of(doc: &Value) -> Option<&str> {
    doc.pointer("/slug/current")?.as_str()
}

impl DocumentSource for StaticSource {
    fn fetch_zine(&self, slug: &str) -> impl Future<Output = Result<Option<Value>>> {
        let found = self.check().map(|()| {
            self.docs
                .iter()
                .find(|doc| slug_of(doc) == Some(slug))
                .cloned()
        });
        ready(found)
    }

    fn fetch_zines(&self) -> impl Future<Output = Result<Vec<Value>>> {
        let docs = self.check().map(|()| {
            self.docs
                .iter()
                .filter(|doc| slug_of(doc).is_some())
                .cloned()
                .collect()
        });
        ready(docs)
    }
}

#[cfg(test)]
mod tests {
    use pollster::block_on;
    use serde_json::json;

    use super::*;

    #[test]
    fn finds_by_slug() {
        let source = StaticSource::new(vec![
            json!({ "_id": "a", "slug": { "current": "one" } }),
            json!({ "_id": "b" }),
        ]);
        let doc = block_on(source.fetch_zine("one")).unwrap().unwrap();
        assert_eq!(doc["_id"], "a");
        assert!(block_on(source.fetch_zine("two")).unwrap().is_none());
        assert_eq!(block_on(source.fetch_zines()).unwrap().len(), 1);
    }

    #[test]
    fn failing_source_reports_transport_errors() {
        let source = StaticSource::failing("offline");
        let err = block_on(source.fetch_zines()).unwrap_err();
        assert_eq!(err.to_string(), "transport error: offline");
    }
}
