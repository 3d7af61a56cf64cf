// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::config::ContentConfig;
use crate::model::ImageSource;

/// Turns CMS image fields into URLs the host can display.
///
/// Returning `None` means the image cannot be shown; pages are then left out
/// of the book and covers fall back to placeholders.
///
/// Closures implement the trait, which keeps tests and custom CDNs short:
///
/// ```rust
/// use flipbook_content::{ImageResolver, ImageSource};
///
/// let resolver = |source: &ImageSource| source.reference().map(|r| format!("/img/{r}"));
/// let url = resolver.resolve(&ImageSource::from_reference("image-a-10x10-png"));
/// assert_eq!(url.as_deref(), Some("/img/image-a-10x10-png"));
/// ```
pub trait ImageResolver {
    /// URL of `source`, or `None` if it cannot be resolved.
    fn resolve(&self, source: &ImageSource) -> Option<String>;
}

impl<F> ImageResolver for F
where
    F: Fn(&ImageSource) -> Option<String>,
{
    fn resolve(&self, source: &ImageSource) -> Option<String> {
        self(source)
    }
}

/// How the CDN fits an image into the requested box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Fit {
    /// Fill the box, cropping overflow.
    #[default]
    Crop,
    /// Fit inside the box, keeping the aspect ratio.
    Clip,
    /// Like `Clip`, but never upscale.
    Max,
}

impl Fit {
    fn as_str(self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::Clip => "clip",
            Self::Max => "max",
        }
    }
}

/// Size and fit requested from the image CDN.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageTransform {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Fit mode.
    pub fit: Fit,
}

impl Default for ImageTransform {
    /// An 800 × 1200 crop, the 2:3 page format of the viewer.
    fn default() -> Self {
        Self {
            width: 800,
            height: 1200,
            fit: Fit::Crop,
        }
    }
}

impl ImageTransform {
    fn query(&self) -> String {
        format!("w={}&h={}&fit={}", self.width, self.height, self.fit.as_str())
    }
}

/// Resolves assets against the CMS image CDN.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CdnResolver {
    base: String,
    transform: ImageTransform,
}

impl CdnResolver {
    /// Resolver for the project and dataset of `config`.
    #[must_use]
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            base: config.image_base(),
            transform: ImageTransform::default(),
        }
    }

    /// Replaces the requested size and fit.
    #[must_use]
    pub fn with_transform(mut self, transform: ImageTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Requested size and fit.
    #[must_use]
    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    /// Maps `image-<id>-<w>x<h>-<ext>` to `<id>-<w>x<h>.<ext>`.
    fn file_name(reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, ext) = rest.rsplit_once('-')?;
        let (id, dims) = rest.rsplit_once('-')?;
        let (w, h) = dims.split_once('x')?;
        let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if id.is_empty() || ext.is_empty() || !numeric(w) || !numeric(h) {
            return None;
        }
        Some(format!("{id}-{dims}.{ext}"))
    }
}

impl ImageResolver for CdnResolver {
    fn resolve(&self, source: &ImageSource) -> Option<String> {
        let query = self.transform.query();
        if let Some(url) = source.url() {
            let sep = if url.contains('?') { '&' } else { '?' };
            return Some(format!("{url}{sep}{query}"));
        }
        let file = Self::file_name(source.reference()?)?;
        Some(format!("{}/{file}?{query}", self.base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssetReference;

    fn resolver() -> CdnResolver {
        CdnResolver::new(&ContentConfig::new("proj", "production"))
    }

    #[test]
    fn resolves_asset_references() {
        let url = resolver().resolve(&ImageSource::from_reference("image-abc123-2000x3000-jpg"));
        assert_eq!(
            url.as_deref(),
            Some("https://cdn.sanity.io/images/proj/production/abc123-2000x3000.jpg?w=800&h=1200&fit=crop")
        );
    }

    #[test]
    fn malformed_references_do_not_resolve() {
        let r = resolver();
        for reference in ["", "file-abc-pdf", "image-abc-jpg", "image-abc-20x-jpg", "image--1x1-png"] {
            assert_eq!(r.resolve(&ImageSource::from_reference(reference)), None, "{reference}");
        }
        assert_eq!(r.resolve(&ImageSource::default()), None);
    }

    #[test]
    fn expanded_urls_get_the_transform() {
        let source = ImageSource {
            asset: Some(AssetReference {
                reference: None,
                url: Some("https://cdn.example/a.png?dl=1".into()),
            }),
        };
        let r = resolver().with_transform(ImageTransform {
            width: 400,
            height: 600,
            fit: Fit::Max,
        });
        assert_eq!(
            r.resolve(&source).as_deref(),
            Some("https://cdn.example/a.png?dl=1&w=400&h=600&fit=max")
        );
    }
}
