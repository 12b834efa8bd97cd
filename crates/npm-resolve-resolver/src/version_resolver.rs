use npm_resolve_cache::MemoCache;
use npm_resolve_error::{ResolveError, Result};
use npm_resolve_registry::RegistryClient;

use crate::model::PackageInfo;

/// Reduces a `(name, descriptor)` pair to a concrete, resolved `PackageInfo`,
/// memoized through a single-flight cache keyed on the literal descriptor.
pub struct VersionResolver {
    registry: RegistryClient,
    cache: MemoCache<PackageInfo, ResolveError>,
}

impl VersionResolver {
    #[must_use]
    pub fn new(registry: RegistryClient) -> Self {
        Self {
            registry,
            cache: MemoCache::new(),
        }
    }

    pub async fn resolve(&self, name: &str, descriptor: &str) -> Result<PackageInfo> {
        let key = format!("{name}@{descriptor}");
        self.cache
            .get_or_fetch(&key, || self.resolve_uncached(name, descriptor))
            .await
    }

    async fn resolve_uncached(&self, name: &str, descriptor: &str) -> Result<PackageInfo> {
        npm_resolve_logger::debug(&format!("resolving {name}@{descriptor}"), true);

        let doc = self
            .registry
            .fetch_package_info(name)
            .await
            .map_err(|e| ResolveError::not_found(name, descriptor, "registry fetch failed").with_cause(e))?;

        // 1. Exact match in `versions`.
        let selected_version = if doc.versions.contains_key(descriptor) {
            descriptor.to_string()
        } else if let Some(tagged) = doc.dist_tags.get(descriptor) {
            // 2. dist-tag lookup takes priority over range satisfaction.
            tagged.clone()
        } else if npm_resolve_semver::valid_range(descriptor).is_ok() {
            // 3. Semver range over published versions.
            let versions: Vec<&String> = doc.versions.keys().collect();
            match npm_resolve_semver::max_satisfying(&versions, descriptor) {
                Some(v) => v,
                None => {
                    return Err(ResolveError::not_found(
                        name,
                        descriptor,
                        "no matching version found",
                    ));
                }
            }
        } else {
            return Err(ResolveError::not_found(
                name,
                descriptor,
                "no matching version found",
            ));
        };

        let record = doc.versions.get(&selected_version).ok_or_else(|| {
            ResolveError::not_found(name, descriptor, "selected version missing from registry document")
        })?;

        Ok(PackageInfo {
            name: record.name.clone().unwrap_or_else(|| name.to_string()),
            version: selected_version,
            dependencies: record.dependencies.clone(),
            peer_dependencies: record.peer_dependencies.clone(),
            dev_dependencies: record.dev_dependencies.clone(),
        })
    }
}
