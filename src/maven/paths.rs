use std::path::{Path, PathBuf};

use crate::maven::coordinates::*;

pub const METADATA_FILE_NAME: &str = "maven-metadata.xml";


/// The path of an artifact relative to the repository root, always '/'-separated, e.g.
///  "com/acme/lib/1.0/lib-1.0-sources.jar"
pub fn as_maven_path(artifact_ref: &MavenArtifactRef) -> String {
    format!(
        "{}/{}/{}/{}",
        artifact_ref.coordinates.group_id.0.replace('.', "/"),
        artifact_ref.coordinates.artifact_id.0,
        artifact_ref.coordinates.version.0,
        maven_file_name(artifact_ref),
    )
}

/// Same layout as [as_maven_path], but with platform separators and anchored at `root`
pub fn resolve_in(root: &Path, artifact_ref: &MavenArtifactRef) -> PathBuf {
    let mut result = version_directory(root, &artifact_ref.coordinates);
    result.push(maven_file_name(artifact_ref));
    result
}

pub fn artifact_directory(root: &Path, group_id: &MavenGroupId, artifact_id: &MavenArtifactId) -> PathBuf {
    let mut result = root.to_path_buf();
    for segment in group_id.segments() {
        result.push(segment);
    }
    result.push(&artifact_id.0);
    result
}

pub fn version_directory(root: &Path, coordinates: &MavenCoordinates) -> PathBuf {
    let mut result = artifact_directory(root, &coordinates.group_id, &coordinates.artifact_id);
    result.push(&coordinates.version.0);
    result
}

/// NB: this is the per-artifact metadata file (listing versions), not the per-version one
pub fn metadata_path(root: &Path, group_id: &MavenGroupId, artifact_id: &MavenArtifactId) -> PathBuf {
    let mut result = artifact_directory(root, group_id, artifact_id);
    result.push(METADATA_FILE_NAME);
    result
}

fn maven_file_name(artifact_ref: &MavenArtifactRef) -> String {
    let classifier_string = match &artifact_ref.classifier {
        MavenClassifier::Unclassified => "".to_string(),
        MavenClassifier::Classified(c) => format!("-{}", c),
    };

    format!("{}-{}{}.{}",
            artifact_ref.coordinates.artifact_id.0,
            artifact_ref.coordinates.version.0,
            classifier_string,
            artifact_ref.extension,
    )
}


#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    fn artifact_ref(group_id: &str, artifact_id: &str, version: &str, classifier: Option<&str>, extension: &str) -> MavenArtifactRef {
        MavenArtifactRef {
            coordinates: MavenCoordinates {
                group_id: MavenGroupId(group_id.to_string()),
                artifact_id: MavenArtifactId(artifact_id.to_string()),
                version: MavenVersion(version.to_string()),
            },
            classifier: classifier.map(|c| c.to_string()).into(),
            extension: extension.to_string(),
        }
    }

    #[rstest]
    #[case::jar("com.acme", "lib", "1.0", None, "jar", "com/acme/lib/1.0/lib-1.0.jar")]
    #[case::pom("com.acme", "lib", "1.0", None, "pom", "com/acme/lib/1.0/lib-1.0.pom")]
    #[case::classifier("com.acme", "lib", "1.0", Some("sources"), "jar", "com/acme/lib/1.0/lib-1.0-sources.jar")]
    #[case::classifier_with_dash("com.acme", "lib", "1.0", Some("mule-plugin"), "jar", "com/acme/lib/1.0/lib-1.0-mule-plugin.jar")]
    #[case::single_segment_group("acme", "lib", "2.1", None, "zip", "acme/lib/2.1/lib-2.1.zip")]
    #[case::dashed_artifact("org.mule.tooling", "mule-core", "4.0.0-SNAPSHOT", None, "jar", "org/mule/tooling/mule-core/4.0.0-SNAPSHOT/mule-core-4.0.0-SNAPSHOT.jar")]
    #[case::range_version("com.acme", "core", "[1.0,2.0)", None, "pom", "com/acme/core/[1.0,2.0)/core-[1.0,2.0).pom")]
    fn test_as_maven_path(#[case] group_id: &str, #[case] artifact_id: &str, #[case] version: &str, #[case] classifier: Option<&str>, #[case] extension: &str, #[case] expected: &str) {
        assert_eq!(as_maven_path(&artifact_ref(group_id, artifact_id, version, classifier, extension)), expected);
    }

    #[test]
    fn test_resolve_in_matches_maven_path() {
        let root = Path::new("/tmp/repo");
        let artifact_ref = artifact_ref("com.acme", "lib", "1.0", Some("tests"), "jar");

        let mut expected = root.to_path_buf();
        for segment in as_maven_path(&artifact_ref).split('/') {
            expected.push(segment);
        }
        assert_eq!(resolve_in(root, &artifact_ref), expected);
    }

    #[test]
    fn test_metadata_path() {
        let root = Path::new("/tmp/repo");
        assert_eq!(
            metadata_path(root, &MavenGroupId("com.acme".to_string()), &MavenArtifactId("lib".to_string())),
            root.join("com").join("acme").join("lib").join("maven-metadata.xml"),
        );
    }
}
