use crate::analyzer::SolutionAnalyzer;
use crate::config::ResolvedConfig;
use crate::error::{Error, Result};
use crate::filter::ProjectFilter;
use crate::graph::ProjectGraph;
use crate::mermaid::MermaidEmitter;
use crate::naming::NameTransformer;
use crate::output::{wrap_markdown, write_diagram};
use msbuild::GraphProvider;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Result of analysing and emitting a solution
#[derive(Debug, Clone)]
pub struct Rendering {
    pub graph: ProjectGraph,
    pub mermaid: String,
}

impl Rendering {
    pub fn project_count(&self) -> usize {
        self.graph.len()
    }

    pub fn markdown(&self) -> String {
        wrap_markdown(&self.mermaid)
    }
}

/// A rendering that has been written to disk
#[derive(Debug, Clone)]
pub struct Generated {
    pub rendering: Rendering,
    pub output: PathBuf,
}

/// analyze -> emit -> write
pub struct Pipeline<P> {
    analyzer: SolutionAnalyzer<P>,
}

impl<P: GraphProvider> Pipeline<P> {
    pub fn new(provider: P) -> Self {
        Self {
            analyzer: SolutionAnalyzer::new(provider),
        }
    }

    pub fn analyze(&self, config: &ResolvedConfig, cancel: &CancellationToken) -> Result<ProjectGraph> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        self.analyzer.analyze(&config.solution)
    }

    /// Analyze the configured solution and emit its diagram text
    pub fn render(&self, config: &ResolvedConfig, cancel: &CancellationToken) -> Result<Rendering> {
        let graph = self.analyze(config, cancel)?;

        let emitter = MermaidEmitter::new(
            NameTransformer::new(&config.naming),
            ProjectFilter::new(&config.exclude),
        );
        let mermaid = emitter.emit(&graph, &config.direction);

        Ok(Rendering { graph, mermaid })
    }

    /// Render, then write the markdown-fenced diagram to the configured output.
    ///
    /// Nothing is written unless rendering succeeded and the run was not
    /// cancelled in the meantime.
    pub fn generate(&self, config: &ResolvedConfig, cancel: &CancellationToken) -> Result<Generated> {
        let output = config.output.clone().ok_or(Error::OutputPathMissing)?;
        let rendering = self.render(config, cancel)?;

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        write_diagram(Some(&output), &rendering.markdown())?;

        Ok(Generated { rendering, output })
    }
}
