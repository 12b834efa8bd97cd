mod analyzer;
mod types;

pub use analyzer::Analyzer;
pub use types::{AnalysisResult, AnalyzerOptions, CombinedAnalysis, MultiPackageAnalysisResult, PackageRequest};

pub use npm_resolve_error::{ResolveError, Result};
pub use npm_resolve_hoist::{HoistedDependency, HoistedTree};
pub use npm_resolve_resolver::{DependencyNode, FlatDependency, FlatIndex, PackageInfo};
