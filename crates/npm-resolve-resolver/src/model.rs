use indexmap::{IndexMap, IndexSet};

/// Immutable record of a single published package version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub dependencies: IndexMap<String, String>,
    pub peer_dependencies: IndexMap<String, String>,
    /// Parsed for completeness; never expanded into edges by the engine.
    pub dev_dependencies: IndexMap<String, String>,
}

/// A node in the logical dependency tree. The same `(name, version)` pair
/// may appear under many parents; each occurrence is its own node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub name: String,
    pub version: String,
    pub dependencies: IndexMap<String, DependencyNode>,
    pub peer_dependencies: IndexMap<String, String>,
}

impl DependencyNode {
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// One entry per unique `(name, version)` pair observed across a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatDependency {
    pub name: String,
    pub version: String,
    pub required_by: IndexSet<String>,
}

/// `{name}@{version}` keyed map of every package occurrence and the parent
/// chains that demanded it. Populated as a side effect of `TreeBuilder`.
pub type FlatIndex = IndexMap<String, FlatDependency>;
