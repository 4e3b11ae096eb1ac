//! Render-trigger interface between the coordinator and the host
//!
//! The coordinator never renders by itself: it asks the host to re-invoke the
//! template matching a [`TemplateSelector`] and moves on without waiting.

mod recording;
mod writer;

pub use recording::RecordingTrigger;
pub use writer::TemplateWriter;

/// Selects the artifacts a re-render request applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSelector {
    /// Exactly the artifact with this filename
    Filename(String),
}

impl TemplateSelector {
    pub fn filename(name: impl Into<String>) -> Self {
        TemplateSelector::Filename(name.into())
    }

    pub fn matches(&self, filename: &str) -> bool {
        match self {
            TemplateSelector::Filename(name) => name == filename,
        }
    }
}

/// Host capability to re-render generated artifacts
///
/// Requests are fire-and-forget.
pub trait RenderTrigger: Send + Sync {
    fn request_rerender(&self, selector: &TemplateSelector);
}
