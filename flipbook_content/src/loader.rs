// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use log::{debug, warn};
use serde_json::Value;

use crate::error::{ContentError, Result};
use crate::model::{BookData, LibraryEntry, ZineDocument};
use crate::resolver::ImageResolver;
use crate::source::DocumentSource;

/// Shown while a book is being fetched.
pub const LOADING_MESSAGE: &str = "Loading xine...";
/// Shown when fetching a book failed.
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load this xine right now.";
/// Shown when no book has the requested slug.
pub const NOT_FOUND_MESSAGE: &str = "This xine could not be found.";
/// Shown when the library could not be listed.
pub const LIBRARY_FAILED_MESSAGE: &str = "Unable to load xines right now.";

/// Identifies one load request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Hands out request ids and remembers which one is current.
///
/// A response is applied only if its request is still the newest one, so a
/// slow response for a previous slug can never overwrite the state of the
/// slug now on screen.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    current: u64,
}

impl RequestTracker {
    /// Creates a tracker with no request in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, superseding all earlier ones.
    pub fn begin(&mut self) -> RequestId {
        self.current = self.current.wrapping_add(1);
        RequestId(self.current)
    }

    /// Returns `true` if `id` is the newest request and was not cancelled.
    #[must_use]
    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.current
    }

    /// Invalidates every request handed out so far.
    pub fn cancel(&mut self) {
        self.current = self.current.wrapping_add(1);
    }
}

/// What the page shell shows for a book.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// A request is in flight.
    #[default]
    Loading,
    /// The book is ready.
    Ready(BookData),
    /// No book has the requested slug.
    NotFound,
    /// Fetching failed; carries the message to show.
    Failed(String),
}

impl LoadState {
    /// The message to show instead of the viewer, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::Ready(_) => None,
            Self::NotFound => Some(NOT_FOUND_MESSAGE),
            Self::Failed(message) => Some(message.as_str()),
        }
    }

    /// The loaded book, if any.
    #[must_use]
    pub fn book(&self) -> Option<&BookData> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(data) => f.write_str(&data.title),
            other => f.write_str(other.message().unwrap_or_default()),
        }
    }
}

fn decode(value: Value) -> Result<ZineDocument> {
    serde_json::from_value(value).map_err(|err| {
        warn!("malformed zine document: {err}");
        ContentError::from(err)
    })
}

/// Fetches, decodes and resolves the book with `slug`.
pub async fn fetch_book<S, R>(source: &S, resolver: &R, slug: &str) -> Result<Option<BookData>>
where
    S: DocumentSource + ?Sized,
    R: ImageResolver + ?Sized,
{
    let Some(value) = source.fetch_zine(slug).await? else {
        return Ok(None);
    };
    let doc = decode(value)?;
    Ok(Some(BookData::from_document(doc, resolver)))
}

/// Lists the library: zines with a slug, by issue number then newest first.
///
/// Malformed documents are skipped.
pub async fn fetch_library<S, R>(source: &S, resolver: &R) -> Result<Vec<LibraryEntry>>
where
    S: DocumentSource + ?Sized,
    R: ImageResolver + ?Sized,
{
    let mut entries: Vec<_> = source
        .fetch_zines()
        .await?
        .into_iter()
        .filter_map(|value| decode(value).ok())
        .filter_map(|doc| LibraryEntry::from_document(doc, resolver))
        .collect();
    entries.sort_by(LibraryEntry::library_order);
    Ok(entries)
}

/// Loads books for the page shell.
///
/// [`BookLoader::load`] covers the common case. Hosts that may switch slugs
/// while a request is in flight split it up: [`BookLoader::begin`] when the
/// slug changes, [`fetch_book`] on their executor, and
/// [`BookLoader::complete`] with the result, which drops responses that were
/// superseded in the meantime.
#[derive(Debug)]
pub struct BookLoader<S, R> {
    source: S,
    resolver: R,
    requests: RequestTracker,
    state: LoadState,
}

impl<S: DocumentSource, R: ImageResolver> BookLoader<S, R> {
    /// Creates a loader.
    pub fn new(source: S, resolver: R) -> Self {
        Self {
            source,
            resolver,
            requests: RequestTracker::new(),
            state: LoadState::Loading,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The document source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The image resolver.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Starts a request and enters [`LoadState::Loading`].
    pub fn begin(&mut self) -> RequestId {
        self.state = LoadState::Loading;
        self.requests.begin()
    }

    /// Applies the result of request `id`.
    ///
    /// Returns `false`, leaving the state untouched, if `id` was superseded
    /// or cancelled.
    pub fn complete(&mut self, id: RequestId, result: Result<Option<BookData>>) -> bool {
        if !self.requests.is_current(id) {
            debug!("dropping stale response for request {}", id.get());
            return false;
        }
        self.state = match result {
            Ok(Some(data)) => LoadState::Ready(data),
            Ok(None) => LoadState::NotFound,
            Err(err) => {
                warn!("failed to load zine: {err}");
                LoadState::Failed(LOAD_FAILED_MESSAGE.to_owned())
            }
        };
        true
    }

    /// Drops whatever request is in flight, e.g. when the page unmounts.
    pub fn cancel(&mut self) {
        self.requests.cancel();
    }

    /// Loads the book with `slug`.
    pub async fn load(&mut self, slug: &str) -> &LoadState {
        let id = self.begin();
        let result = fetch_book(&self.source, &self.resolver, slug).await;
        self.complete(id, result);
        &self.state
    }

    /// Lists the library.
    pub async fn library(&self) -> Result<Vec<LibraryEntry>> {
        fetch_library(&self.source, &self.resolver).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_requests_supersede_older_ones() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));

        tracker.cancel();
        assert!(!tracker.is_current(second));
    }

    #[test]
    fn state_messages() {
        assert_eq!(LoadState::default().message(), Some("Loading xine..."));
        assert_eq!(
            LoadState::NotFound.to_string(),
            "This xine could not be found."
        );
        assert_eq!(
            LoadState::Failed(LOAD_FAILED_MESSAGE.into()).message(),
            Some("Unable to load this xine right now.")
        );
    }
}
