//! diagram - solution dependency graph to Mermaid
//!
//! Graph analysis, name rewriting, filtering and deterministic emission.

mod analyzer;
mod config;
mod error;
mod filter;
mod graph;
mod mermaid;
mod naming;
mod output;
mod pipeline;

pub use analyzer::SolutionAnalyzer;
pub use config::{
    DiagramConfig, FilterConfig, NamingConfig, OutputConfig, RawConfig, ResolvedConfig,
    DEFAULT_CONFIG_FILE,
};
pub use error::{Error, Result};
pub use filter::ProjectFilter;
pub use graph::{NodeId, ProjectGraph, ProjectNode};
pub use mermaid::{MermaidEmitter, LINE_ENDING};
pub use naming::NameTransformer;
pub use output::{wrap_markdown, wrap_markdown_with, write_diagram};
pub use pipeline::{Generated, Pipeline, Rendering};
