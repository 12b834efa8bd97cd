pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_ACCEPT_HEADER: &str = "application/json";
pub const USER_AGENT: &str = "npm-resolve/0.1.0";
pub const VIRTUAL_ROOT_NAME: &str = "virtual-root";
pub const VIRTUAL_ROOT_VERSION: &str = "0.0.0";
pub const ROOT_PARENT_PATH: &str = "root";
