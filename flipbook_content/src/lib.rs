// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=flipbook_content --heading-base-level=0

//! Flipbook Content: loading zines for the flipbook viewer.
//!
//! Zines are authored in a hosted CMS. This crate turns CMS documents into
//! [`Book`](flipbook_book::Book)s the viewer can mount:
//!
//! - [`ZineDocument`]: serde model of a zine document as the CMS returns it.
//! - [`ImageResolver`]: turns image fields into URLs. [`CdnResolver`] targets
//!   the CMS image CDN with an 800 × 1200 crop; closures work too.
//! - [`DocumentSource`]: the async query seam. Hosts implement it over their
//!   HTTP client of choice; [`StaticSource`] serves documents from memory.
//! - [`BookLoader`]: fetches one zine by slug into a [`LoadState`], ignoring
//!   responses that were superseded by a newer request.
//! - [`fetch_library`]: lists every zine with a slug in library order.
//!
//! Connection settings live in [`ContentConfig`], read from the environment by
//! [`ContentConfig::from_env`].
//!
//! ## Minimal example
//!
//! ```rust
//! use flipbook_content::{BookLoader, ImageSource, LoadState, StaticSource};
//! use serde_json::json;
//!
//! let source = StaticSource::new(vec![json!({
//!     "_id": "zine-1",
//!     "title": "Issue one",
//!     "slug": { "current": "issue-one" },
//!     "pages": [{ "asset": { "_ref": "p1" } }, { "asset": { "_ref": "p2" } }]
//! })]);
//! let resolver = |img: &ImageSource| img.reference().map(|r| format!("/img/{r}"));
//! let mut loader = BookLoader::new(source, resolver);
//!
//! let state = pollster::block_on(loader.load("issue-one"));
//! let book = state.book().unwrap().clone().into_book();
//! assert_eq!(book.pages(), ["/img/p1", "/img/p2"]);
//!
//! pollster::block_on(loader.load("missing"));
//! assert_eq!(loader.state(), &LoadState::NotFound);
//! ```

mod config;
mod error;
mod loader;
mod model;
mod resolver;
mod source;

pub use config::{API_VERSION_VAR, ContentConfig, DATASET_VAR, PROJECT_ID_VAR};
pub use error::{ContentError, Result};
pub use loader::{
    BookLoader, LIBRARY_FAILED_MESSAGE, LOAD_FAILED_MESSAGE, LOADING_MESSAGE, LoadState,
    NOT_FOUND_MESSAGE, RequestId, RequestTracker, fetch_book, fetch_library,
};
pub use model::{AssetReference, BookData, ImageSource, LibraryEntry, Slug, ZineDocument};
pub use resolver::{CdnResolver, Fit, ImageResolver, ImageTransform};
pub use source::{DocumentSource, StaticSource};
