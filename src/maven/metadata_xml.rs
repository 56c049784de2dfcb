use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::maven::checksums::{write_checksums, ChecksumPolicy};
use crate::maven::coordinates::*;
use crate::maven::paths::{artifact_directory, metadata_path, resolve_in};
use crate::maven::pom::to_xml_document;
use crate::maven::version_scheme::GenericVersion;


/// The per-artifact maven-metadata.xml, as described at
///  https://maven.apache.org/ref/3.9.5/maven-repository-metadata/repository-metadata.html
///
/// Only the version listing is modelled - plugin prefixes and snapshot versioning are not
///  needed for synthetic repositories.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename = "metadata", rename_all = "camelCase")]
pub struct Metadata {
    pub group_id: String,
    pub artifact_id: String,
    pub versioning: Versioning,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub release: Option<String>,
    pub versions: Versions,
    pub last_updated: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Versions {
    #[serde(default)]
    pub version: Vec<String>,
}

impl Metadata {
    /// `versions` in any order - they are sorted here
    pub fn new(group_id: &MavenGroupId, artifact_id: &MavenArtifactId, versions: Vec<String>, last_updated: String) -> Metadata {
        let mut versions = versions;
        versions.sort_by_cached_key(|v| GenericVersion::new(v));

        let latest = versions.last().cloned();
        let release = versions.iter()
            .rev()
            .find(|v| !MavenVersion(v.to_string()).is_snapshot())
            .cloned();

        Metadata {
            group_id: group_id.0.clone(),
            artifact_id: artifact_id.0.clone(),
            versioning: Versioning {
                latest,
                release,
                versions: Versions { version: versions },
                last_updated,
            },
        }
    }
}

pub fn read_metadata(xml: &str) -> anyhow::Result<Metadata> {
    Ok(quick_xml::de::from_str(xml)?)
}

/// Rewrites the maven-metadata.xml of an artifact from the versions that are currently present
///  in the repository. A version counts as present if its directory holds the version's pom file.
pub fn update_version_metadata(root: &Path, group_id: &MavenGroupId, artifact_id: &MavenArtifactId, checksums: ChecksumPolicy) -> anyhow::Result<PathBuf> {
    let versions = present_versions(root, group_id, artifact_id)?;
    let metadata = Metadata::new(group_id, artifact_id, versions, last_updated_now());

    let path = metadata_path(root, group_id, artifact_id);
    debug!("writing {} with versions {:?}", path.display(), metadata.versioning.versions.version);

    let xml = to_xml_document("metadata", &metadata)
        .with_context(|| format!("failed to serialize metadata for {}:{}", group_id.0, artifact_id.0))?;
    fs::write(&path, xml)
        .with_context(|| format!("failed to write {}", path.display()))?;
    write_checksums(&path, checksums)?;

    Ok(path)
}

fn present_versions(root: &Path, group_id: &MavenGroupId, artifact_id: &MavenArtifactId) -> anyhow::Result<Vec<String>> {
    let directory = artifact_directory(root, group_id, artifact_id);
    let mut result = Vec::new();

    for entry in fs::read_dir(&directory).with_context(|| format!("failed to list {}", directory.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let version = entry.file_name().to_string_lossy().to_string();
        let pom = resolve_in(root, &MavenArtifactRef::pom(&MavenCoordinates {
            group_id: group_id.clone(),
            artifact_id: artifact_id.clone(),
            version: MavenVersion(version.clone()),
        }));
        if pom.is_file() {
            result.push(version);
        }
    }
    Ok(result)
}

/// "yyyyMMddHHmmss" in UTC
fn last_updated_now() -> String {
    format_last_updated(OffsetDateTime::now_utc())
}

fn format_last_updated(t: OffsetDateTime) -> String {
    format!("{:04}{:02}{:02}{:02}{:02}{:02}",
            t.year(),
            u8::from(t.month()),
            t.day(),
            t.hour(),
            t.minute(),
            t.second(),
    )
}
