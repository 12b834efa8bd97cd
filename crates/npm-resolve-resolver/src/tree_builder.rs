use async_recursion::async_recursion;
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use npm_resolve_constants::ROOT_PARENT_PATH;
use npm_resolve_error::Result;

use crate::model::{DependencyNode, FlatDependency, FlatIndex};
use crate::version_resolver::VersionResolver;

/// Builds the logical dependency tree concurrently, populating a flat index
/// of every `(name, version)` occurrence as a side effect.
pub struct TreeBuilder {
    resolver: VersionResolver,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(resolver: VersionResolver) -> Self {
        Self { resolver }
    }

    /// Build the logical tree rooted at `(name, descriptor)`.
    pub async fn build_root(&self, name: &str, descriptor: &str) -> Result<(DependencyNode, FlatIndex)> {
        let flat = Arc::new(Mutex::new(FlatIndex::new()));
        let node = self
            .build(name.to_string(), descriptor.to_string(), flat.clone(), None, IndexSet::new())
            .await?;
        let flat = match Arc::try_unwrap(flat) {
            Ok(mutex) => mutex.into_inner(),
            Err(arc) => arc.lock().await.clone(),
        };
        Ok((node, flat))
    }

    #[async_recursion]
    async fn build(
        &self,
        name: String,
        descriptor: String,
        flat: Arc<Mutex<FlatIndex>>,
        parent_path: Option<String>,
        active_path: IndexSet<String>,
    ) -> Result<DependencyNode> {
        let info = self.resolver.resolve(&name, &descriptor).await?;
        let node_key = format!("{}@{}", info.name, info.version);

        {
            let parent_label = parent_path.clone().unwrap_or_else(|| ROOT_PARENT_PATH.to_string());
            let mut flat = flat.lock().await;
            flat.entry(node_key.clone())
                .and_modify(|existing| {
                    existing.required_by.insert(parent_label.clone());
                })
                .or_insert_with(|| FlatDependency {
                    name: info.name.clone(),
                    version: info.version.clone(),
                    required_by: IndexSet::from([parent_label]),
                });
        }

        let node = DependencyNode {
            name: info.name.clone(),
            version: info.version.clone(),
            dependencies: IndexMap::new(),
            peer_dependencies: info.peer_dependencies.clone(),
        };

        if active_path.contains(&node_key) {
            npm_resolve_logger::debug(&format!("cycle detected at {node_key}, truncating"), true);
            return Ok(node);
        }

        let mut next_active = active_path;
        next_active.insert(node_key.clone());

        let current_path = match &parent_path {
            Some(p) => format!("{p} > {node_key}"),
            None => node_key.clone(),
        };

        let child_names: Vec<String> = info.dependencies.keys().cloned().collect();
        let futures = info.dependencies.iter().map(|(child_name, child_descriptor)| {
            self.build(
                child_name.clone(),
                child_descriptor.clone(),
                flat.clone(),
                Some(current_path.clone()),
                next_active.clone(),
            )
        });

        let results = futures::future::join_all(futures).await;

        let mut node = node;
        for (child_name, result) in child_names.into_iter().zip(results) {
            node.dependencies.insert(child_name, result?);
        }

        Ok(node)
    }
}
