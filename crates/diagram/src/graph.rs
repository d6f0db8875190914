use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Index of a node inside its `ProjectGraph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One build project
#[derive(Debug, Clone)]
pub struct ProjectNode {
    id: String,
    path: PathBuf,
    dependencies: BTreeSet<NodeId>,
}

impl ProjectNode {
    /// Diagram-safe identifier, e.g. `Company_App` for `Company.App.csproj`
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Direct outgoing edges
    pub fn dependencies(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dependencies.iter().copied()
    }

    pub fn depends_on(&self, other: NodeId) -> bool {
        self.dependencies.contains(&other)
    }
}

/// Arena of project nodes; edges are `NodeId`s into the same arena
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    nodes: Vec<ProjectNode>,
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its handle
    pub(crate) fn add_node(&mut self, id: impl Into<String>, path: impl Into<PathBuf>) -> NodeId {
        let handle = NodeId(self.nodes.len());
        self.nodes.push(ProjectNode {
            id: id.into(),
            path: path.into(),
            dependencies: BTreeSet::new(),
        });
        handle
    }

    /// Record `from -> to`. Self-loops and repeated edges are ignored.
    ///
    /// Returns whether a new edge was stored.
    pub(crate) fn add_dependency(&mut self, from: NodeId, to: NodeId) -> bool {
        if from == to || to.0 >= self.nodes.len() {
            return false;
        }
        match self.nodes.get_mut(from.0) {
            Some(node) => node.dependencies.insert(to),
            None => false,
        }
    }

    /// `None` for a handle that belongs to another graph
    pub fn node(&self, id: NodeId) -> Option<&ProjectNode> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[ProjectNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ProjectNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.dependencies.len()).sum()
    }
}
