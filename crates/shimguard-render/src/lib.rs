//! Rendering for CI surfaces (Markdown summaries, GitHub annotations).
//!
//! Renderers take a [`RenderableReport`], a flattened view with no serde or
//! time types, so output depends only on the findings and their order.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdict,
};
