pub const MAVEN_MODEL_VERSION: &str = "4.0.0";

/// the packaging-descriptor type - artifacts of this type consist of nothing but their pom file
pub const TYPE_POM: &str = "pom";
pub const TYPE_JAR: &str = "jar";

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct MavenVersion(pub String);
impl MavenVersion {
    pub fn is_snapshot(&self) -> bool {
        self.0.ends_with("-SNAPSHOT")
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MavenArtifactId(pub String);

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MavenGroupId(pub String);
impl MavenGroupId {
    /// "com.acme.lib" -> ["com", "acme", "lib"]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MavenCoordinates {
    pub group_id: MavenGroupId,
    pub artifact_id: MavenArtifactId,
    pub version: MavenVersion,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum MavenClassifier {
    Unclassified,
    Classified(String),
}
impl From<Option<String>> for MavenClassifier {
    fn from(value: Option<String>) -> Self {
        match value {
            None => MavenClassifier::Unclassified,
            Some(c) => MavenClassifier::Classified(c),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MavenArtifactRef {
    pub coordinates: MavenCoordinates,
    pub classifier: MavenClassifier,
    pub extension: String, // without leading '.', e.g. "jar"
}
impl MavenArtifactRef {
    /// The pom file never carries a classifier, even if the artifact itself has one
    pub fn pom(coordinates: &MavenCoordinates) -> MavenArtifactRef {
        MavenArtifactRef {
            coordinates: coordinates.clone(),
            classifier: MavenClassifier::Unclassified,
            extension: TYPE_POM.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    #[rstest]
    #[case::release("1.0.0", false)]
    #[case::snapshot("1.0.0-SNAPSHOT", true)]
    #[case::lowercase_snapshot("1.0.0-snapshot", false)]
    #[case::snapshot_without_dash("1.0.0SNAPSHOT", false)]
    fn test_is_snapshot(#[case] version: &str, #[case] expected: bool) {
        assert_eq!(MavenVersion(version.to_string()).is_snapshot(), expected);
    }

    #[test]
    fn test_pom_ref_drops_classifier() {
        let coordinates = MavenCoordinates {
            group_id: MavenGroupId("com.acme".to_string()),
            artifact_id: MavenArtifactId("lib".to_string()),
            version: MavenVersion("1.0".to_string()),
        };
        let pom = MavenArtifactRef::pom(&coordinates);
        assert_eq!(pom.classifier, MavenClassifier::Unclassified);
        assert_eq!(pom.extension, "pom");
        assert_eq!(pom.coordinates, coordinates);
    }
}
