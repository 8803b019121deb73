use crate::error::{Error, Result};

// Parse semantic version string (e.g. "1.2.3") into (major, minor, patch).
// The patch segment may carry a pre-release tail ("3-beta.0" parses as 3);
// major and minor must be plain non-negative integers.
pub fn parse_semver(version: &str) -> Result<(u64, u64, u64)> {
    let invalid = || Error::InvalidVersion(version.to_string());

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() < 3 {
        return Err(invalid());
    }
    let major = parts[0].parse().map_err(|_| invalid())?;
    let minor = parts[1].parse().map_err(|_| invalid())?;
    let patch = parts[2]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .filter(|digits| !digits.is_empty())
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())?;
    Ok((major, minor, patch))
}
