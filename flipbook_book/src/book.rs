// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

/// A book handed to the viewer: covers plus an ordered list of page images.
///
/// `I` is whatever the host uses to refer to an image: a URL string, an asset
/// handle, a texture id. The viewer never looks inside it.
///
/// The page list is fixed for the lifetime of the value; there is no way to
/// insert or remove pages once the book is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book<I> {
    id: String,
    cover: Option<I>,
    back_cover: Option<I>,
    pages: Vec<I>,
}

impl<I> Book<I> {
    /// Creates a book.
    ///
    /// `id` is the book's identity: loading a book with a different id into a
    /// viewer resets the viewer, loading one with the same id does not.
    pub fn new(
        id: impl Into<String>,
        cover: Option<I>,
        back_cover: Option<I>,
        pages: impl IntoIterator<Item = I>,
    ) -> Self {
        Self {
            id: id.into(),
            cover,
            back_cover,
            pages: pages.into_iter().collect(),
        }
    }

    /// Identity of the book.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of interior pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of two-page spreads, rounding a trailing single page up.
    #[must_use]
    pub fn spread_count(&self) -> usize {
        self.pages.len().div_ceil(2)
    }

    /// All interior pages in order.
    #[must_use]
    pub fn pages(&self) -> &[I] {
        &self.pages
    }

    /// Page at `index`, or `None` past the end.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&I> {
        self.pages.get(index)
    }

    /// Front cover image.
    #[must_use]
    pub fn cover(&self) -> Option<&I> {
        self.cover.as_ref()
    }

    /// Back cover image, falling back to the front cover when the book has
    /// no dedicated back cover.
    #[must_use]
    pub fn back_cover(&self) -> Option<&I> {
        self.back_cover.as_ref().or(self.cover.as_ref())
    }

    /// Resolves a [`Source`] to its image, if the book has one.
    #[must_use]
    pub fn resolve(&self, source: Source) -> Option<&I> {
        match source {
            Source::FrontCover => self.cover(),
            Source::BackCover => self.back_cover(),
            Source::Page(index) => self.page(index),
        }
    }
}

/// Where a visible surface takes its image from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// The front cover.
    FrontCover,
    /// The back cover (or the front cover when there is none).
    BackCover,
    /// An interior page by index.
    Page(usize),
}
