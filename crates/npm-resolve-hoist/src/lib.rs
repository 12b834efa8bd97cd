use indexmap::IndexMap;
use npm_resolve_resolver::DependencyNode;

/// A package placed somewhere in the hoisted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoistedDependency {
    pub name: String,
    pub version: String,
    /// Direct dependency name -> resolved version; recursion happens by
    /// looking the name back up through the hoisted tree, not by nesting.
    pub dependencies: IndexMap<String, String>,
    pub peer_dependencies: IndexMap<String, String>,
    pub parent: Option<String>,
}

impl HoistedDependency {
    fn from_node(node: &DependencyNode, parent: Option<String>) -> Self {
        let dependencies = node
            .dependencies
            .iter()
            .map(|(name, child)| (name.clone(), child.version.clone()))
            .collect();

        Self {
            name: node.name.clone(),
            version: node.version.clone(),
            dependencies,
            peer_dependencies: node.peer_dependencies.clone(),
            parent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoistedTree {
    pub root: IndexMap<String, HoistedDependency>,
    pub nested: IndexMap<String, IndexMap<String, HoistedDependency>>,
}

/// Converts a logical `DependencyNode` tree into a `HoistedTree`, honoring
/// version-conflict and peer-dependency placement rules.
pub struct HoistPlanner;

impl HoistPlanner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Plan a single-package tree. The root is placed at root unconditionally
    /// — trivially true anyway since `CanHoist`/`VersionConflict` are vacuous
    /// against an empty tree — then its dependencies are walked normally.
    #[must_use]
    pub fn plan(&self, root: &DependencyNode) -> HoistedTree {
        let mut tree = HoistedTree::default();
        self.walk(&mut tree, root, npm_resolve_constants::ROOT_PARENT_PATH);
        tree
    }

    /// Plan a forest of independently-required roots sharing one hoisted
    /// tree, as used for the synthetic virtual root of a multi-package
    /// analysis. `parent_path` is the virtual root's own key; the virtual
    /// root node itself is never inserted into the hoisted tree.
    #[must_use]
    pub fn plan_forest<'a>(
        &self,
        parent_path: &str,
        roots: impl IntoIterator<Item = &'a DependencyNode>,
    ) -> HoistedTree {
        let mut tree = HoistedTree::default();
        for root in roots {
            self.walk(&mut tree, root, parent_path);
        }
        tree
    }

    fn walk(&self, tree: &mut HoistedTree, node: &DependencyNode, parent_path: &str) {
        match tree.root.get(&node.name) {
            None if can_hoist(tree, node) => {
                npm_resolve_logger::debug(&format!("hoisting {} to root", node.key()), true);
                tree.root
                    .insert(node.name.clone(), HoistedDependency::from_node(node, None));
            }
            Some(existing)
                if !version_conflict(&existing.version, &node.version) && can_hoist(tree, node) =>
            {
                // Already hoisted under a compatible version; reuse, don't duplicate.
            }
            _ => {
                npm_resolve_logger::debug(
                    &format!("nesting {} under {parent_path}", node.key()),
                    true,
                );
                tree.nested
                    .entry(parent_path.to_string())
                    .or_default()
                    .insert(
                        node.name.clone(),
                        HoistedDependency::from_node(node, Some(parent_path.to_string())),
                    );
            }
        }

        let next_parent = node.key();
        for child in node.dependencies.values() {
            self.walk(tree, child, &next_parent);
        }
    }
}

impl Default for HoistPlanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Two packages of the same name conflict unless they are string-identical,
/// or one is concrete and satisfies the other treated as a range. Both
/// ranges (or unparseable input) are conservatively treated as a conflict.
#[must_use]
pub fn version_conflict(existing: &str, candidate: &str) -> bool {
    if existing == candidate {
        return false;
    }

    let existing_concrete = npm_resolve_semver::valid(existing);
    let candidate_concrete = npm_resolve_semver::valid(candidate);

    match (existing_concrete, candidate_concrete) {
        (Some(_), Some(_)) => true,
        (Some(_), None) => !npm_resolve_semver::satisfies(existing, candidate),
        (None, Some(_)) => !npm_resolve_semver::satisfies(candidate, existing),
        (None, None) => true,
    }
}

/// A candidate may hoist to root iff it doesn't violate any peer
/// declaration already at root, and no root package violates a peer
/// declaration the candidate itself carries.
#[must_use]
pub fn can_hoist(tree: &HoistedTree, candidate: &DependencyNode) -> bool {
    for root_pkg in tree.root.values() {
        if let Some(peer_range) = root_pkg.peer_dependencies.get(&candidate.name) {
            if !npm_resolve_semver::satisfies(&candidate.version, peer_range) {
                return false;
            }
        }
    }

    for (peer_name, peer_range) in &candidate.peer_dependencies {
        if let Some(root_pkg) = tree.root.get(peer_name) {
            if !npm_resolve_semver::satisfies(&root_pkg.version, peer_range) {
                return false;
            }
        }
    }

    true
}
