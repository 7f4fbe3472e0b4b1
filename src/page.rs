//! Pages, orientation, and page box layout.
//!
//! The page box is derived from the paper size and the current orientation.
//! Every page owns a [`PageLayout`] fitted into that box once its image has
//! loaded. Changing the orientation is the only bulk re-layout trigger: all
//! layouts are rebuilt into a fresh vector and swapped in at once, so no caller
//! ever observes a half-updated page set. A single page is re-laid out only
//! when its own image finishes loading.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::error::ErrorCode;
use crate::fit::{PageLayout, fit_to_page};
use crate::units::PaperSize;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    #[serde(alias = "book")]
    Portrait,
    /// Wider than tall.
    #[serde(alias = "album")]
    Landscape,
}

impl Orientation {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Portrait,
        }
    }
}

/// Page box dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub width: f64,
    pub height: f64,
}

impl PageBox {
    /// Page box for `paper` in `orientation`.
    #[must_use]
    pub fn for_paper(paper: PaperSize, orientation: Orientation) -> Self {
        let (width, height) = match orientation {
            Orientation::Portrait => paper.portrait_px(),
            Orientation::Landscape => paper.landscape_px(),
        };
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Intrinsic pixel dimensions reported by the image loader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

/// Failure reported by the image loader.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("image failed to load: {source_id}: {reason}")]
pub struct LoadError {
    pub source_id: String,
    pub reason: String,
}

impl ErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        "E_LOAD_FAILED"
    }

    fn retryable(&self) -> bool {
        true
    }
}

/// Load state of an image owned by a page or overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageState {
    /// Requested; no result yet. Rendered as a placeholder.
    #[default]
    Pending,
    /// Loaded with the given intrinsic size.
    Loaded(ImageSize),
    /// The loader gave up. Rendered as a placeholder until the host retries.
    Failed(LoadError),
}

impl ImageState {
    #[must_use]
    pub fn size(&self) -> Option<ImageSize> {
        match self {
            Self::Loaded(size) => Some(*size),
            Self::Pending | Self::Failed(_) => None,
        }
    }
}

/// One document page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Source identifier handed to the image loader.
    pub source: String,
    pub image: ImageState,
    /// Fitted layout; `None` until the image has loaded with valid dimensions.
    pub layout: Option<PageLayout>,
}

impl Page {
    #[must_use]
    pub fn pending(source: impl Into<String>) -> Self {
        Self { source: source.into(), image: ImageState::Pending, layout: None }
    }

    /// This page with its layout recomputed for `page_box`.
    #[must_use]
    pub fn relaid(&self, page_box: PageBox) -> Self {
        Self { source: self.source.clone(), image: self.image.clone(), layout: layout_for(&self.image, page_box) }
    }
}

fn layout_for(image: &ImageState, page_box: PageBox) -> Option<PageLayout> {
    let size = image.size()?;
    match fit_to_page(size.width, size.height, page_box.width, page_box.height) {
        Ok(layout) => Some(layout),
        Err(e) => {
            tracing::warn!(error = %e, "page image cannot be fitted; leaving placeholder");
            None
        }
    }
}

/// Recompute every page's layout for `page_box`.
///
/// Pure: returns a new page list and leaves the input untouched.
#[must_use]
pub fn recompute_layouts(pages: &[Page], page_box: PageBox) -> Vec<Page> {
    pages.iter().map(|p| p.relaid(page_box)).collect()
}

/// Error returned by page navigation and load callbacks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PageError {
    #[error("page index {index} out of range (document has {len} pages)")]
    OutOfRange { index: usize, len: usize },
}

impl ErrorCode for PageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "E_PAGE_OUT_OF_RANGE",
        }
    }
}

/// Entry in the page thumbnail strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail<'a> {
    pub index: usize,
    pub source: &'a str,
    pub active: bool,
}

/// The page sequence together with orientation, page box, and page rotation.
#[derive(Debug, Clone)]
pub struct Document {
    paper: PaperSize,
    orientation: Orientation,
    page_box: PageBox,
    pages: Vec<Page>,
    current_page: usize,
    rotation_degrees: f64,
}

impl Document {
    #[must_use]
    pub fn new(paper: PaperSize) -> Self {
        let orientation = Orientation::default();
        Self {
            paper,
            orientation,
            page_box: PageBox::for_paper(paper, orientation),
            pages: Vec::new(),
            current_page: 0,
            rotation_degrees: 0.0,
        }
    }

    // --- Orientation ---

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn page_box(&self) -> PageBox {
        self.page_box
    }

    /// Change orientation, recompute the page box, and re-lay out every page.
    ///
    /// Returns `false` when `orientation` is already current.
    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if orientation == self.orientation {
            return false;
        }
        self.orientation = orientation;
        self.page_box = PageBox::for_paper(self.paper, orientation);
        self.pages = recompute_layouts(&self.pages, self.page_box);
        tracing::debug!(?orientation, width = self.page_box.width, height = self.page_box.height, "page box changed");
        true
    }

    pub fn toggle_orientation(&mut self) {
        self.set_orientation(self.orientation.toggled());
    }

    // --- Pages ---

    /// Replace the page list with pending pages for `sources`, resetting to the first page.
    pub fn set_pages<I, S>(&mut self, sources: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages = sources.into_iter().map(Page::pending).collect();
        self.current_page = 0;
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Record a loaded page image and fit that page into the current box.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] for an unknown page index.
    pub fn on_page_loaded(&mut self, index: usize, size: ImageSize) -> Result<&Page, PageError> {
        let len = self.pages.len();
        let page_box = self.page_box;
        let page = self.pages.get_mut(index).ok_or(PageError::OutOfRange { index, len })?;
        page.image = ImageState::Loaded(size);
        page.layout = layout_for(&page.image, page_box);
        Ok(page)
    }

    /// Record a page image load failure. The page keeps rendering as a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] for an unknown page index.
    pub fn on_page_load_failed(&mut self, index: usize, error: LoadError) -> Result<(), PageError> {
        let len = self.pages.len();
        let page = self.pages.get_mut(index).ok_or(PageError::OutOfRange { index, len })?;
        tracing::warn!(error = %error, index, "page image unavailable");
        page.image = ImageState::Failed(error);
        page.layout = None;
        Ok(())
    }

    /// Layout to draw for page `index`: the fitted layout, or the whole box when
    /// the page has no usable image yet.
    #[must_use]
    pub fn effective_layout(&self, index: usize) -> Option<PageLayout> {
        let page = self.pages.get(index)?;
        Some(page.layout.unwrap_or_else(|| PageLayout::full_box(self.page_box.width, self.page_box.height)))
    }

    // --- Navigation ---

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Make `index` the active page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::OutOfRange`] for an unknown page index.
    pub fn set_current_page(&mut self, index: usize) -> Result<(), PageError> {
        if index >= self.pages.len() {
            return Err(PageError::OutOfRange { index, len: self.pages.len() });
        }
        self.current_page = index;
        Ok(())
    }

    #[must_use]
    pub fn thumbnails(&self) -> Vec<Thumbnail<'_>> {
        self.pages
            .iter()
            .enumerate()
            .map(|(index, p)| Thumbnail { index, source: &p.source, active: index == self.current_page })
            .collect()
    }

    // --- Page rotation ---

    /// Rotation of the page group about the page box center, in `[0, 360)`.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        self.rotation_degrees = crate::transform::normalize_degrees(degrees);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(PaperSize::A4)
    }
}
