use indexmap::IndexMap;

use npm_resolve_constants::{DEFAULT_REGISTRY, DEFAULT_TIMEOUT_MS};
use npm_resolve_hoist::HoistedTree;
use npm_resolve_resolver::{DependencyNode, FlatIndex};

/// Options accepted by `Analyzer::new`.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub registry: String,
    pub timeout_ms: u64,
    pub headers: IndexMap<String, String>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            headers: IndexMap::new(),
        }
    }
}

/// One package entry for `Analyzer::analyze_many`.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    pub name: String,
    pub version: String,
}

impl PackageRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Result of `Analyzer::analyze_one`.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub dependency_tree: DependencyNode,
    pub hoisted_tree: HoistedTree,
    pub flat_dependencies: FlatIndex,
}

/// The merged view produced for a multi-package analysis: every individual
/// tree's flat index unioned together, then hoisted as one forest rooted at
/// the synthetic virtual root (which never appears in `hoisted_tree.root`
/// itself).
#[derive(Debug, Clone, Default)]
pub struct CombinedAnalysis {
    pub hoisted_tree: HoistedTree,
    pub flat_dependencies: FlatIndex,
}

/// Result of `Analyzer::analyze_many`.
#[derive(Debug, Clone, Default)]
pub struct MultiPackageAnalysisResult {
    /// Keyed by `"{name}@{descriptor}"`, in request order.
    pub individual: IndexMap<String, AnalysisResult>,
    pub combined: CombinedAnalysis,
}
