use crate::filter::ProjectFilter;
use crate::graph::ProjectGraph;
use crate::naming::NameTransformer;
use std::collections::BTreeSet;

/// Terminator written after every diagram line
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Mermaid diagram emitter
pub struct MermaidEmitter {
    naming: NameTransformer,
    filter: ProjectFilter,
}

impl MermaidEmitter {
    pub fn new(naming: NameTransformer, filter: ProjectFilter) -> Self {
        Self { naming, filter }
    }

    /// Render the dependency edges of `graph` as a Mermaid `graph`.
    ///
    /// Edges touching a filtered project are dropped. Labels are transformed
    /// before deduplication, so raw edges that end up with the same labels
    /// render once. Lines are sorted by (source, target) label.
    pub fn emit(&self, graph: &ProjectGraph, direction: &str) -> String {
        let edges = self.collect_edges(graph);

        let mut out = String::new();
        out.push_str("graph ");
        out.push_str(direction);
        out.push_str(LINE_ENDING);

        for (from, to) in &edges {
            out.push_str("    ");
            out.push_str(from);
            out.push_str(" --> ");
            out.push_str(to);
            out.push_str(LINE_ENDING);
        }

        out
    }

    /// Transformed, deduplicated and ordered `(from, to)` label pairs
    pub fn collect_edges(&self, graph: &ProjectGraph) -> BTreeSet<(String, String)> {
        let mut edges = BTreeSet::new();

        for (_, node) in graph.iter() {
            if !self.filter.is_allowed(node.id()) {
                continue;
            }

            let from = self.naming.transform(node.id());

            for dep in node.dependencies().filter_map(|dep| graph.node(dep)) {
                let dep_id = dep.id();
                if !self.filter.is_allowed(dep_id) {
                    continue;
                }
                edges.insert((from.clone(), self.naming.transform(dep_id)));
            }
        }

        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use pretty_assertions::assert_eq;

    fn plain_emitter() -> MermaidEmitter {
        MermaidEmitter::new(
            NameTransformer::new(&NamingConfig::default()),
            ProjectFilter::new(Vec::<String>::new()),
        )
    }

    fn lines(lines: &[&str]) -> String {
        lines.iter().map(|l| format!("{}{}", l, LINE_ENDING)).collect()
    }

    #[test]
    fn test_empty_graph_is_header_only() {
        let result = plain_emitter().emit(&ProjectGraph::new(), "TD");
        assert_eq!(result, format!("graph TD{}", LINE_ENDING));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_empty_graph_literal() {
        assert_eq!(plain_emitter().emit(&ProjectGraph::new(), "TD"), "graph TD\n");
    }

    #[test]
    fn test_duplicate_edges_render_once_sorted() {
        let mut graph = ProjectGraph::new();
        let a = graph.add_node("A", "/A.csproj");
        let b = graph.add_node("B", "/B.csproj");
        let c = graph.add_node("C", "/C.csproj");
        graph.add_dependency(a, b);
        graph.add_dependency(a, c);
        graph.add_dependency(a, b);

        let result = plain_emitter().emit(&graph, "LR");
        assert_eq!(result, lines(&["graph LR", "    A --> B", "    A --> C"]));
    }

    #[test]
    fn test_sort_order_by_source_then_target() {
        let mut graph = ProjectGraph::new();
        let b = graph.add_node("B", "/B.csproj");
        let c = graph.add_node("C", "/C.csproj");
        let a = graph.add_node("A", "/A.csproj");
        graph.add_dependency(b, c);
        graph.add_dependency(a, c);
        graph.add_dependency(a, b);

        let result = plain_emitter().emit(&graph, "TD");
        assert_eq!(
            result,
            lines(&["graph TD", "    A --> B", "    A --> C", "    B --> C"])
        );
    }

    #[test]
    fn test_sort_is_ordinal() {
        let mut graph = ProjectGraph::new();
        let lower = graph.add_node("api", "/api.csproj");
        let upper = graph.add_node("Zed", "/Zed.csproj");
        let core = graph.add_node("Core", "/Core.csproj");
        graph.add_dependency(lower, core);
        graph.add_dependency(upper, core);

        let result = plain_emitter().emit(&graph, "TD");
        assert_eq!(
            result,
            lines(&["graph TD", "    Zed --> Core", "    api --> Core"])
        );
    }

    #[test]
    fn test_filtered_source_and_target_are_skipped() {
        let mut graph = ProjectGraph::new();
        let source = graph.add_node("Source", "/s.csproj");
        let excluded = graph.add_node("Excluded", "/e.csproj");
        let other = graph.add_node("Other", "/o.csproj");
        graph.add_dependency(source, excluded);
        graph.add_dependency(excluded, other);
        graph.add_dependency(other, excluded);

        let emitter = MermaidEmitter::new(
            NameTransformer::new(&NamingConfig::default()),
            ProjectFilter::new(["excluded"]),
        );

        assert_eq!(emitter.emit(&graph, "TD"), lines(&["graph TD"]));
    }

    #[test]
    fn test_alias_collision_collapses_edges() {
        let mut graph = ProjectGraph::new();
        let web = graph.add_node("Web", "/Web.csproj");
        let data_a = graph.add_node("Data_Sql", "/Data.Sql.csproj");
        let data_b = graph.add_node("Data_Mongo", "/Data.Mongo.csproj");
        graph.add_dependency(web, data_a);
        graph.add_dependency(web, data_b);

        let naming = NamingConfig {
            strip_prefix: None,
            aliases: [("Data_Sql", "Data"), ("Data_Mongo", "Data")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        let emitter = MermaidEmitter::new(
            NameTransformer::new(&naming),
            ProjectFilter::new(Vec::<String>::new()),
        );

        assert_eq!(emitter.emit(&graph, "TD"), lines(&["graph TD", "    Web --> Data"]));
    }

    #[test]
    fn test_filter_applies_to_raw_id_not_label() {
        let mut graph = ProjectGraph::new();
        let app = graph.add_node("Shop_App", "/Shop.App.csproj");
        let lib = graph.add_node("Shop_Lib", "/Shop.Lib.csproj");
        graph.add_dependency(app, lib);

        let emitter = MermaidEmitter::new(
            NameTransformer::new(&NamingConfig {
                strip_prefix: Some("Shop_".to_string()),
                aliases: Default::default(),
            }),
            ProjectFilter::new(["Shop_Lib"]),
        );

        assert_eq!(emitter.emit(&graph, "TD"), lines(&["graph TD"]));
    }

    #[test]
    fn test_cycle_renders_reciprocal_edges() {
        let mut graph = ProjectGraph::new();
        let a = graph.add_node("A", "/A.csproj");
        let b = graph.add_node("B", "/B.csproj");
        graph.add_dependency(a, b);
        graph.add_dependency(b, a);

        assert_eq!(
            plain_emitter().emit(&graph, "TD"),
            lines(&["graph TD", "    A --> B", "    B --> A"])
        );
    }

    #[test]
    fn test_direction_is_passed_through() {
        let result = plain_emitter().emit(&ProjectGraph::new(), "whatever");
        assert!(result.starts_with("graph whatever"));
    }

    #[test]
    fn test_emit_is_deterministic_across_insertion_orders() {
        let build = |order: &[usize]| {
            let names = ["Api", "Core", "Data", "Web"];
            let mut graph = ProjectGraph::new();
            let ids: Vec<_> = order
                .iter()
                .map(|&i| graph.add_node(names[i], format!("/{}.csproj", names[i])))
                .collect();
            let by_name = |n: &str| ids[order.iter().position(|&i| names[i] == n).unwrap()];
            for (from, to) in [("Web", "Api"), ("Api", "Core"), ("Api", "Data"), ("Data", "Core")] {
                graph.add_dependency(by_name(from), by_name(to));
            }
            graph
        };

        let emitter = plain_emitter();
        let first = emitter.emit(&build(&[0, 1, 2, 3]), "LR");
        let second = emitter.emit(&build(&[3, 2, 1, 0]), "LR");
        assert_eq!(first, second);
        assert_eq!(first, emitter.emit(&build(&[0, 1, 2, 3]), "LR"));
    }
}
