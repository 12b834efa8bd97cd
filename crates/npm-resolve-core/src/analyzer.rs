use indexmap::IndexMap;

use npm_resolve_constants::{VIRTUAL_ROOT_NAME, VIRTUAL_ROOT_VERSION};
use npm_resolve_error::{ResolveError, Result};
use npm_resolve_hoist::HoistPlanner;
use npm_resolve_registry::{RegistryClient, RegistryClientConfig};
use npm_resolve_resolver::{FlatIndex, TreeBuilder, VersionResolver};

use crate::types::{AnalysisResult, AnalyzerOptions, CombinedAnalysis, MultiPackageAnalysisResult, PackageRequest};

/// Top-level façade: resolves a single package or a batch of packages into
/// a logical dependency tree and its hoisted projection.
pub struct Analyzer {
    tree_builder: TreeBuilder,
    hoist_planner: HoistPlanner,
}

impl Analyzer {
    #[must_use]
    pub fn new(options: AnalyzerOptions) -> Self {
        let registry = RegistryClient::new(RegistryClientConfig {
            registry: options.registry,
            timeout_ms: options.timeout_ms,
            headers: options.headers,
        });
        let resolver = VersionResolver::new(registry);

        Self {
            tree_builder: TreeBuilder::new(resolver),
            hoist_planner: HoistPlanner::new(),
        }
    }

    /// Resolve and hoist a single `(name, version)` pair.
    pub async fn analyze_one(&self, name: &str, version: &str) -> Result<AnalysisResult> {
        if name.trim().is_empty() {
            return Err(ResolveError::InvalidArguments("package name is required".to_string()));
        }
        if version.trim().is_empty() {
            return Err(ResolveError::InvalidArguments("package version is required".to_string()));
        }

        npm_resolve_logger::status(&format!("analyzing {name}@{version}"));

        let (dependency_tree, flat_dependencies) = self.tree_builder.build_root(name, version).await?;
        let hoisted_tree = self.hoist_planner.plan(&dependency_tree);

        Ok(AnalysisResult {
            dependency_tree,
            hoisted_tree,
            flat_dependencies,
        })
    }

    /// Resolve and hoist a batch of packages, plus a combined view produced
    /// by hoisting all of them together under a synthetic virtual root. An
    /// empty `packages` slice returns a well-formed, empty result.
    pub async fn analyze_many(&self, packages: &[PackageRequest]) -> Result<MultiPackageAnalysisResult> {
        let mut individual = IndexMap::new();

        for request in packages {
            let key = format!("{}@{}", request.name, request.version);
            let result = self.analyze_one(&request.name, &request.version).await?;
            individual.insert(key, result);
        }

        if individual.is_empty() {
            return Ok(MultiPackageAnalysisResult::default());
        }

        let virtual_root_key = format!("{VIRTUAL_ROOT_NAME}@{VIRTUAL_ROOT_VERSION}");
        let combined_tree = self
            .hoist_planner
            .plan_forest(&virtual_root_key, individual.values().map(|r| &r.dependency_tree));

        let mut combined_flat = FlatIndex::new();
        for result in individual.values() {
            merge_flat_index(&mut combined_flat, &result.flat_dependencies);
        }

        Ok(MultiPackageAnalysisResult {
            individual,
            combined: CombinedAnalysis {
                hoisted_tree: combined_tree,
                flat_dependencies: combined_flat,
            },
        })
    }
}

/// Union `source` into `target`, merging `requiredBy` sets on matching keys.
fn merge_flat_index(target: &mut FlatIndex, source: &FlatIndex) {
    for (key, dep) in source {
        target
            .entry(key.clone())
            .and_modify(|existing| {
                for parent in &dep.required_by {
                    existing.required_by.insert(parent.clone());
                }
            })
            .or_insert_with(|| dep.clone());
    }
}
