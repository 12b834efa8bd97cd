mod model;
mod tree_builder;
mod version_resolver;

pub use model::{DependencyNode, FlatDependency, FlatIndex, PackageInfo};
pub use tree_builder::TreeBuilder;
pub use version_resolver::VersionResolver;
