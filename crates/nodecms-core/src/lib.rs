//! nodecms Core Library
//!
//! Core types shared by every stage of the nodecms pipeline: content nodes,
//! the markup tree, the document head collector, build errors and
//! configuration.

pub mod config;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod head;
pub mod markup;
pub mod node;

pub use config::Config;
pub use error::{BuildError, CoreError, Phase, Result};
pub use head::{HeadCollector, HeadError, HeadTags};
pub use markup::{Element, Markup};
pub use node::{Node, NodeExt};
