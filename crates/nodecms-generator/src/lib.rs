//! nodecms Generator Library
//!
//! Static site generation engine for nodecms.
//!
//! # Modules
//!
//! - [`template`] - HTML document template with variable interpolation
//! - [`page`] - Single page builds
//! - [`assets`] - Stylesheet output
//! - [`collection`] - Collection overviews
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collection;
pub mod page;
pub mod template;

pub use assets::{DEFAULT_STYLESHEET, write_stylesheet};
pub use build::{BuildReport, Builder};
pub use collection::{OverviewItem, collect_items, overview_node, sort_items};
pub use page::{LIVERELOAD_SCRIPT, PageBuilder, PageSource};
pub use template::{Template, TemplateContext, TemplateError};
