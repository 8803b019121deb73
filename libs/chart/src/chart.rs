use crate::error::{Error, Result};
use crate::parse::parse_semver;

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

/// Chart name of the GitLab auto-deploy chart. Only releases deployed from
/// this chart resolve to a version.
pub const MANAGED_CHART_NAME: &str = "auto-deploy-app";

/// File name helm mandates for a chart definition.
pub const CHART_FILE_NAME: &str = "Chart.yaml";

/// One entry of a `helm ls -o json` listing. Helm emits more fields
/// (revision, status, namespace, app_version, updated) but they are not
/// consumed here.
#[derive(Deserialize, Debug, Clone)]
pub struct ReleaseRecord {
    pub name: String,
    pub chart: String,
}

/// The `name` and `version` keys of a `Chart.yaml`.
#[derive(Deserialize, Debug, Clone)]
pub struct ChartDefinition {
    pub name: String,
    pub version: String,
}

/// Version of a managed chart. Only obtainable through the loaders, which
/// check the chart name against [`MANAGED_CHART_NAME`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartVersion {
    major: u64,
    minor: u64,
    patch: u64,
}

impl ChartVersion {
    #[inline]
    pub fn major(&self) -> u64 {
        self.major
    }

    #[inline]
    pub fn minor(&self) -> u64 {
        self.minor
    }

    #[inline]
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Resolve the chart version of `release_name` from a `helm ls -o json`
    /// listing.
    ///
    /// Returns `Ok(None)` when the release is not listed or was not deployed
    /// from the managed chart. Only the matched record needs the full
    /// `name`/`chart` shape; other entries are skipped as opaque objects.
    pub fn load_from_helm_ls(data: &[u8], release_name: &str) -> Result<Option<Self>> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::Utf8Error("helm release listing is not UTF-8".to_string(), e))?;
        let releases: Vec<Value> = serde_json::from_str(text).map_err(|e| {
            Error::SerializationError("failed to parse helm release listing".to_string(), e)
        })?;

        let matched = releases
            .into_iter()
            .find(|r| r.get("name").and_then(Value::as_str) == Some(release_name));
        let release = match matched {
            Some(release) => release,
            None => {
                trace!(release = release_name, "release not present in listing");
                return Ok(None);
            }
        };
        let record: ReleaseRecord = serde_json::from_value(release).map_err(|e| {
            Error::SerializationError(format!("malformed release record {release_name:?}"), e)
        })?;

        let (chart_name, chart_version) = split_chart(&record.chart);
        Self::from_managed(chart_name, chart_version)
    }

    /// Resolve the chart version from the `Chart.yaml` inside `chart_dir`.
    ///
    /// Returns `Ok(None)` when the definition names a chart other than the
    /// managed one. A missing file is an error, not absence.
    pub fn load_from_chart_yaml(chart_dir: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = chart_dir.as_ref().join(CHART_FILE_NAME);
        let raw = fs::read_to_string(&path)
            .map_err(|e| Error::IoError(format!("failed to read {}", path.display()), e))?;
        let definition: ChartDefinition = serde_yaml::from_str(&raw)
            .map_err(|e| Error::YamlError(format!("failed to parse {}", path.display()), e))?;

        Self::from_managed(&definition.name, &definition.version)
    }

    fn from_managed(chart_name: &str, version: &str) -> Result<Option<Self>> {
        if chart_name != MANAGED_CHART_NAME {
            debug!(chart = chart_name, "not an auto-deploy chart");
            return Ok(None);
        }
        let (major, minor, patch) = parse_semver(version)?;
        Ok(Some(ChartVersion {
            major,
            minor,
            patch,
        }))
    }
}

// The chart field of a helm listing packs `<name>-<version>`. Chart names may
// themselves contain dashes, so the version segment starts at the last dash
// immediately followed by a digit. Names ending in dash-digit runs stay
// ambiguous; the trailing run wins.
fn split_chart(chart: &str) -> (&str, &str) {
    let bytes = chart.as_bytes();
    let split = (0..bytes.len().saturating_sub(1))
        .rev()
        .find(|&i| bytes[i] == b'-' && bytes[i + 1].is_ascii_digit());
    match split {
        Some(i) => (&chart[..i], &chart[i + 1..]),
        None => (chart, ""),
    }
}
