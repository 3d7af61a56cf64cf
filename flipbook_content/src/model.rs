// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cmp::Ordering;

use flipbook_book::Book;
use serde::{Deserialize, Serialize};

use crate::resolver::ImageResolver;

/// A slug as stored by the CMS: `{ "current": "issue-1" }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    /// The slug text.
    #[serde(default)]
    pub current: Option<String>,
}

/// Reference to an uploaded asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReference {
    /// Asset id, e.g. `image-<hash>-800x1200-jpg`.
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
    /// Direct URL, present when the asset reference was expanded.
    #[serde(default)]
    pub url: Option<String>,
}

/// An image field as stored by the CMS.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// The referenced asset.
    #[serde(default)]
    pub asset: Option<AssetReference>,
}

impl ImageSource {
    /// Source pointing at the asset `reference`.
    #[must_use]
    pub fn from_reference(reference: impl Into<String>) -> Self {
        Self {
            asset: Some(AssetReference {
                reference: Some(reference.into()),
                url: None,
            }),
        }
    }

    /// The asset id, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.asset.as_ref()?.reference.as_deref()
    }

    /// The expanded asset URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.asset.as_ref()?.url.as_deref()
    }
}

/// A zine document as returned by the CMS.
///
/// Everything but the id is optional on the wire; editors can publish a zine
/// before all images are uploaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZineDocument {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<Slug>,
    /// Issue number, starting at 1.
    #[serde(default)]
    pub issue_number: Option<u32>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Front cover.
    #[serde(default)]
    pub cover_image: Option<ImageSource>,
    /// Back cover.
    #[serde(default)]
    pub back_cover_image: Option<ImageSource>,
    /// Interior pages in reading order. `null` entries are kept so the
    /// decode never fails on a half-edited page list.
    #[serde(default)]
    pub pages: Vec<Option<ImageSource>>,
    /// Publication timestamp, RFC 3339.
    #[serde(default)]
    pub published_at: Option<String>,
}

impl ZineDocument {
    /// The slug text, or `""` when the document has none.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug
            .as_ref()
            .and_then(|slug| slug.current.as_deref())
            .unwrap_or_default()
    }
}

/// A zine with every image resolved to a URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookData {
    /// Document id; also the identity of the viewer's book.
    pub id: String,
    /// Display title.
    pub title: String,
    /// URL slug, empty if the document has none.
    pub slug: String,
    /// Issue number.
    pub issue_number: Option<u32>,
    /// Short description.
    pub description: Option<String>,
    /// Front cover URL.
    pub cover: Option<String>,
    /// Back cover URL.
    pub back_cover: Option<String>,
    /// Page URLs. Pages whose image could not be resolved are left out.
    pub pages: Vec<String>,
}

impl BookData {
    /// Resolves the images of `doc` with `resolver`.
    pub fn from_document<R: ImageResolver + ?Sized>(doc: ZineDocument, resolver: &R) -> Self {
        let pages = doc
            .pages
            .iter()
            .flatten()
            .filter_map(|page| resolver.resolve(page))
            .collect();
        Self {
            cover: doc.cover_image.as_ref().and_then(|img| resolver.resolve(img)),
            back_cover: doc
                .back_cover_image
                .as_ref()
                .and_then(|img| resolver.resolve(img)),
            slug: doc.slug().to_owned(),
            id: doc.id,
            title: doc.title,
            issue_number: doc.issue_number,
            description: doc.description,
            pages,
        }
    }

    /// The book handed to the viewer.
    #[must_use]
    pub fn into_book(self) -> Book<String> {
        Book::new(self.id, self.cover, self.back_cover, self.pages)
    }
}

/// One entry of the zine library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryEntry {
    /// Document id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// URL slug; never empty.
    pub slug: String,
    /// Issue number.
    pub issue_number: Option<u32>,
    /// Front cover URL.
    pub cover: Option<String>,
    /// Publication timestamp, RFC 3339.
    pub published_at: Option<String>,
}

impl LibraryEntry {
    /// Builds an entry from `doc`, or `None` if it has no slug to link to.
    pub fn from_document<R: ImageResolver + ?Sized>(doc: ZineDocument, resolver: &R) -> Option<Self> {
        let slug = doc.slug().to_owned();
        if slug.is_empty() {
            return None;
        }
        Some(Self {
            cover: doc.cover_image.as_ref().and_then(|img| resolver.resolve(img)),
            id: doc.id,
            title: doc.title,
            slug,
            issue_number: doc.issue_number,
            published_at: doc.published_at,
        })
    }

    /// Library order: issue number ascending with unnumbered issues last,
    /// then newest first.
    #[must_use]
    pub fn library_order(&self, other: &Self) -> Ordering {
        let by_issue = match (self.issue_number, other.issue_number) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        // RFC 3339 timestamps in one zone sort lexicographically; `None` is
        // the oldest.
        by_issue.then_with(|| other.published_at.cmp(&self.published_at))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resolve(source: &ImageSource) -> Option<String> {
        source.reference().map(|r| format!("https://img/{r}"))
    }

    #[test]
    fn decodes_cms_document() {
        let doc: ZineDocument = serde_json::from_value(json!({
            "_id": "zine-1",
            "title": "First",
            "slug": { "current": "first" },
            "issueNumber": 1,
            "coverImage": { "asset": { "_ref": "image-a-800x1200-jpg" } },
            "pages": [
                { "asset": { "_ref": "image-b-800x1200-jpg" } },
                null,
                { "asset": null }
            ],
            "publishedAt": "2024-05-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(doc.slug(), "first");
        assert_eq!(doc.issue_number, Some(1));
        assert_eq!(doc.pages.len(), 3);
        assert_eq!(doc.back_cover_image, None);
    }

    #[test]
    fn unresolvable_pages_are_dropped() {
        let doc: ZineDocument = serde_json::from_value(json!({
            "_id": "zine-1",
            "title": "First",
            "pages": [
                { "asset": { "_ref": "p1" } },
                null,
                {},
                { "asset": { "_ref": "p2" } }
            ]
        }))
        .unwrap();

        let data = BookData::from_document(doc, &resolve);
        assert_eq!(data.slug, "");
        assert_eq!(data.cover, None);
        assert_eq!(data.pages, ["https://img/p1", "https://img/p2"]);

        let book = data.into_book();
        assert_eq!(book.id(), "zine-1");
        assert_eq!(book.page_count(), 2);
        assert_eq!(book.back_cover(), None);
    }

    #[test]
    fn library_entries_need_a_slug() {
        let doc = |slug: Option<&str>| ZineDocument {
            id: "z".into(),
            title: "Z".into(),
            slug: Some(Slug {
                current: slug.map(Into::into),
            }),
            issue_number: None,
            description: None,
            cover_image: None,
            back_cover_image: None,
            pages: Vec::new(),
            published_at: None,
        };
        assert!(LibraryEntry::from_document(doc(None), &resolve).is_none());
        assert!(LibraryEntry::from_document(doc(Some("")), &resolve).is_none());
        assert!(LibraryEntry::from_document(doc(Some("z")), &resolve).is_some());
    }
}
