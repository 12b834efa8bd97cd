use semver::Version;

/// Parse a version string, filling in missing minor/patch components
/// the way npm ranges like `^1` or `~1.2` expect.
pub fn parse_partial_version(version_str: &str) -> Result<Version, String> {
    let cleaned = version_str.trim();

    if cleaned.is_empty() || cleaned == "*" {
        return Ok(Version::new(0, 0, 0));
    }

    if let Ok(version) = Version::parse(cleaned) {
        return Ok(version);
    }

    let parts: Vec<&str> = cleaned.split('.').collect();
    match parts.len() {
        1 => {
            let major = parts[0]
                .parse::<u64>()
                .map_err(|_| format!("invalid major version: {}", parts[0]))?;
            Ok(Version::new(major, 0, 0))
        }
        2 => {
            let major = parts[0]
                .parse::<u64>()
                .map_err(|_| format!("invalid major version: {}", parts[0]))?;
            let minor = parts[1]
                .parse::<u64>()
                .map_err(|_| format!("invalid minor version: {}", parts[1]))?;
            Ok(Version::new(major, minor, 0))
        }
        _ => {
            let extended = if !cleaned.contains('.') {
                format!("{cleaned}.0.0")
            } else if cleaned.matches('.').count() == 1 {
                format!("{cleaned}.0")
            } else {
                cleaned.to_string()
            };
            Version::parse(&extended).map_err(|e| format!("invalid version '{cleaned}': {e}"))
        }
    }
}
