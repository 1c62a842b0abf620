//! Fakes for the editing-side collaborators.

use std::cell::RefCell;

use crate::editing::{ContentPolicy, EditingDocument, ImageElement, ImageUnavailable, TextSerialization};
use crate::mime::Bitmap;

/// Fragments record which constructor produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Markup(String),
    Text(String),
}

/// A document whose selection is fixed text and whose markup is that
/// text wrapped in a span.
#[derive(Debug, Default)]
pub struct FakeDocument {
    pub text: String,
    pub alt_text: String,
    /// Markup that fails to parse.
    pub reject_markup: bool,
    pub policies: RefCell<Vec<ContentPolicy>>,
}

impl FakeDocument {
    pub fn with_selection(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            alt_text: format!("{text} [img]"),
            ..Self::default()
        }
    }
}

impl EditingDocument for FakeDocument {
    type Range = ();
    type Fragment = Fragment;

    fn selected_text(&self, serialization: TextSerialization) -> String {
        match serialization {
            TextSerialization::SelectedText => self.text.clone(),
            TextSerialization::IncludeImageAltText => self.alt_text.clone(),
        }
    }

    fn serialize_markup(&self, _range: &()) -> String {
        format!("<span class=\"Apple-interchange\">{}</span>", self.text)
    }

    fn fragment_from_markup(&self, markup: &str, policy: ContentPolicy) -> Option<Fragment> {
        self.policies.borrow_mut().push(policy);
        (!self.reject_markup).then(|| Fragment::Markup(markup.to_owned()))
    }

    fn fragment_from_text(&self, _context: &(), text: &str) -> Option<Fragment> {
        Some(Fragment::Text(text.to_owned()))
    }
}

/// An element with a fixed rendering outcome.
pub struct FakeImage(pub Result<Bitmap, ImageUnavailable>);

impl ImageElement for FakeImage {
    fn rendered_image(&self) -> Result<Bitmap, ImageUnavailable> {
        self.0.clone()
    }
}

pub fn pixel() -> Bitmap {
    Bitmap::from_rgba(1, 1, vec![10, 20, 30, 255]).unwrap()
}
