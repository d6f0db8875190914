use crate::error::Result;
use crate::graph::{NodeId, ProjectGraph};
use msbuild::{path_key, GraphProvider, ProjectEntry};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Builds a `ProjectGraph` from whatever a `GraphProvider` reports
pub struct SolutionAnalyzer<P> {
    provider: P,
}

impl<P: GraphProvider> SolutionAnalyzer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Load the solution and wire up direct project references.
    ///
    /// References to projects outside the solution are dropped, as are
    /// self-references.
    pub fn analyze(&self, solution: &Path) -> Result<ProjectGraph> {
        let entries = self.provider.load_graph(solution)?;
        Ok(Self::build_graph(&entries))
    }

    #[doc(hidden)]
    pub fn build_graph(entries: &[ProjectEntry]) -> ProjectGraph {
        let mut graph = ProjectGraph::new();
        let mut by_path: HashMap<String, NodeId> = HashMap::new();
        let mut taken: HashSet<String> = HashSet::new();
        let mut sources = Vec::with_capacity(entries.len());

        for entry in entries {
            let key = path_key(&entry.path);
            if let Some(&existing) = by_path.get(&key) {
                // duplicate path, first one wins but its references still count
                sources.push((existing, entry));
                continue;
            }

            let id = unique_id(Self::to_id(entry.stem()), &mut taken);
            let node = graph.add_node(id, entry.path.clone());
            by_path.insert(key, node);
            sources.push((node, entry));
        }

        for (from, entry) in sources {
            for reference in &entry.references {
                match by_path.get(&path_key(reference)) {
                    Some(&to) => {
                        graph.add_dependency(from, to);
                    }
                    None => tracing::debug!(
                        "{} references {} outside the solution",
                        entry.path.display(),
                        reference.display()
                    ),
                }
            }
        }

        graph
    }

    /// `Company.App-Core` -> `Company_App_Core`
    #[doc(hidden)]
    pub fn to_id(stem: &str) -> String {
        stem.replace(['.', '-'], "_")
    }
}

/// Suffix `_2`, `_3`, ... onto ids that are already in use
fn unique_id(id: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(id.clone()) {
        return id;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", id, n);
        if taken.insert(candidate.clone()) {
            tracing::debug!("Project id {} already used, renamed to {}", id, candidate);
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msbuild::LoadError;
    use std::path::PathBuf;

    type Analyzer = SolutionAnalyzer<StaticProvider>;

    struct StaticProvider(Vec<ProjectEntry>);

    impl GraphProvider for StaticProvider {
        fn load_graph(&self, _solution: &Path) -> msbuild::Result<Vec<ProjectEntry>> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    impl GraphProvider for FailingProvider {
        fn load_graph(&self, solution: &Path) -> msbuild::Result<Vec<ProjectEntry>> {
            Err(LoadError::Parse {
                path: solution.to_path_buf(),
                reason: "broken".to_string(),
            })
        }
    }

    fn ids(graph: &ProjectGraph, node: NodeId) -> Vec<&str> {
        let mut deps: Vec<_> = graph
            .node(node)
            .unwrap()
            .dependencies()
            .filter_map(|d| graph.node(d))
            .map(|d| d.id())
            .collect();
        deps.sort();
        deps
    }

    #[test]
    fn test_to_id_sanitizes_stem() {
        assert_eq!(Analyzer::to_id("Company.App-Core"), "Company_App_Core");
        assert_eq!(Analyzer::to_id("Plain"), "Plain");
    }

    #[test]
    fn test_analyze_wires_references() {
        let provider = StaticProvider(vec![
            ProjectEntry::new("/s/Project.A/Project.A.csproj")
                .with_reference("/s/Project.B/Project.B.csproj"),
            ProjectEntry::new("/s/Project.B/Project.B.csproj"),
        ]);

        let graph = SolutionAnalyzer::new(provider)
            .analyze(Path::new("/s/s.slnx"))
            .unwrap();

        let a = graph.find("Project_A").unwrap();
        let b = graph.find("Project_B").unwrap();
        assert!(graph.node(a).unwrap().depends_on(b));
        assert_eq!(graph.node(b).unwrap().dependencies().count(), 0);
        assert_eq!(graph.node(a).unwrap().path(), Path::new("/s/Project.A/Project.A.csproj"));
    }

    #[test]
    fn test_self_reference_is_dropped() {
        let graph = Analyzer::build_graph(&[
            ProjectEntry::new("/s/A.csproj").with_reference("/s/A.csproj")
        ]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_self_reference_with_different_case_is_dropped() {
        let graph = Analyzer::build_graph(&[
            ProjectEntry::new("/s/A.csproj").with_reference("/S/a.CSPROJ")
        ]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_unresolved_reference_is_dropped() {
        let graph = Analyzer::build_graph(&[
            ProjectEntry::new("/s/A.csproj").with_reference("/elsewhere/X.csproj")
        ]);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_reference_resolves_case_insensitively() {
        let graph = Analyzer::build_graph(&[
            ProjectEntry::new("/s/App/App.csproj").with_reference("/S/LIB/lib.csproj"),
            ProjectEntry::new("/s/Lib/Lib.csproj"),
        ]);
        let app = graph.find("App").unwrap();
        assert_eq!(ids(&graph, app), vec!["Lib"]);
    }

    #[test]
    fn test_duplicate_path_keeps_first_node() {
        let graph = Analyzer::build_graph(&[
            ProjectEntry::new("/s/Lib/Lib.csproj"),
            ProjectEntry::new("/S/lib/LIB.csproj").with_reference("/s/Core.csproj"),
            ProjectEntry::new("/s/Core.csproj"),
        ]);

        assert_eq!(graph.len(), 2);
        let lib = graph.find("Lib").unwrap();
        assert_eq!(graph.node(lib).unwrap().path(), Path::new("/s/Lib/Lib.csproj"));
        assert_eq!(ids(&graph, lib), vec!["Core"]);
    }

    #[test]
    fn test_repeated_reference_is_one_dependency() {
        let graph = Analyzer::build_graph(&[
            ProjectEntry::new("/s/A.csproj")
                .with_reference("/s/B.csproj")
                .with_reference("/s/B.csproj"),
            ProjectEntry::new("/s/B.csproj"),
        ]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_colliding_ids_are_suffixed() {
        let graph = Analyzer::build_graph(&[
            ProjectEntry::new("/s/a/Foo.Bar.csproj").with_reference("/s/b/Foo-Bar.csproj"),
            ProjectEntry::new("/s/b/Foo-Bar.csproj"),
            ProjectEntry::new("/s/c/Foo_Bar.csproj"),
        ]);

        let names: Vec<_> = graph.nodes().iter().map(|n| n.id()).collect();
        assert_eq!(names, vec!["Foo_Bar", "Foo_Bar_2", "Foo_Bar_3"]);
        let first = graph.find("Foo_Bar").unwrap();
        assert_eq!(ids(&graph, first), vec!["Foo_Bar_2"]);
        assert_eq!(
            graph.node(graph.find("Foo_Bar_2").unwrap()).unwrap().path(),
            PathBuf::from("/s/b/Foo-Bar.csproj")
        );
    }

    #[test]
    fn test_suffix_skips_ids_in_use() {
        let graph = Analyzer::build_graph(&[
            ProjectEntry::new("/s/Foo_Bar_2.csproj"),
            ProjectEntry::new("/s/Foo.Bar.csproj"),
            ProjectEntry::new("/s/x/Foo.Bar.csproj"),
        ]);
        let names: Vec<_> = graph.nodes().iter().map(|n| n.id()).collect();
        assert_eq!(names, vec!["Foo_Bar_2", "Foo_Bar", "Foo_Bar_3"]);
    }

    #[test]
    fn test_provider_error_is_solution_load_error() {
        let err = SolutionAnalyzer::new(FailingProvider)
            .analyze(Path::new("/s/broken.sln"))
            .unwrap_err();

        match err {
            crate::Error::SolutionLoad(load) => {
                assert_eq!(load.path(), Path::new("/s/broken.sln"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
