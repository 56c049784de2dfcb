use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, trace};

use crate::maven::checksums::{write_checksums, ChecksumPolicy};
use crate::maven::coordinates::*;
use crate::maven::metadata_xml::update_version_metadata;
use crate::maven::paths::resolve_in;
use crate::maven::pom::{Dependency, DescriptorWriter, PomXmlWriter, Project};
use crate::maven::version_scheme::{classify_version, GenericVersionScheme, VersionKind, VersionScheme};


/// Starts describing an artifact of type "jar" without classifier or dependencies
pub fn artifact(group_id: &str, artifact_id: &str, version: &str) -> ArtifactBuilder {
    ArtifactBuilder {
        group_id: group_id.to_string(),
        artifact_id: artifact_id.to_string(),
        version: version.to_string(),
        artifact_type: TYPE_JAR.to_string(),
        classifier: None,
        optional: None,
        dependencies: vec![],
    }
}

/// Starts describing a dependency. A dependency is both an entry in its parent's pom and an
///  artifact in its own right, which is created alongside the parent unless its version is a range.
pub fn dependency(group_id: &str, artifact_id: &str, version: &str) -> DependencyBuilder {
    DependencyBuilder {
        artifact: artifact(group_id, artifact_id, version),
        scope: None,
    }
}


#[derive(Debug, Clone)]
pub struct ArtifactBuilder {
    group_id: String,
    artifact_id: String,
    version: String,
    artifact_type: String,
    classifier: Option<String>,
    optional: Option<String>,
    dependencies: Vec<DependencyBuilder>,
}
impl ArtifactBuilder {
    pub fn group_id(mut self, group_id: &str) -> Self {
        self.group_id = group_id.to_string();
        self
    }

    pub fn artifact_id(mut self, artifact_id: &str) -> Self {
        self.artifact_id = artifact_id.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// the artifact file's extension and the pom's packaging, e.g. "jar", "zip" or "pom"
    pub fn artifact_type(mut self, artifact_type: &str) -> Self {
        self.artifact_type = artifact_type.to_string();
        self
    }

    pub fn classifier(mut self, classifier: &str) -> Self {
        self.classifier = Some(classifier.to_string());
        self
    }

    /// only relevant when this describes a dependency - passed through to the parent's pom verbatim
    pub fn optional(mut self, optional: &str) -> Self {
        self.optional = Some(optional.to_string());
        self
    }

    /// replaces any previously configured dependencies
    pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = DependencyBuilder>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    pub fn build(self) -> ArtifactCreator {
        ArtifactCreator {
            coordinates: MavenCoordinates {
                group_id: MavenGroupId(self.group_id),
                artifact_id: MavenArtifactId(self.artifact_id),
                version: MavenVersion(self.version),
            },
            artifact_type: self.artifact_type,
            classifier: self.classifier.into(),
            dependencies: self.dependencies,
        }
    }
}


/// An artifact builder plus the one thing only a dependency has: a scope
#[derive(Debug, Clone)]
pub struct DependencyBuilder {
    artifact: ArtifactBuilder,
    scope: Option<String>,
}
impl DependencyBuilder {
    pub fn group_id(mut self, group_id: &str) -> Self {
        self.artifact = self.artifact.group_id(group_id);
        self
    }

    pub fn artifact_id(mut self, artifact_id: &str) -> Self {
        self.artifact = self.artifact.artifact_id(artifact_id);
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.artifact = self.artifact.version(version);
        self
    }

    pub fn artifact_type(mut self, artifact_type: &str) -> Self {
        self.artifact = self.artifact.artifact_type(artifact_type);
        self
    }

    pub fn classifier(mut self, classifier: &str) -> Self {
        self.artifact = self.artifact.classifier(classifier);
        self
    }

    pub fn optional(mut self, optional: &str) -> Self {
        self.artifact = self.artifact.optional(optional);
        self
    }

    /// dependencies of the dependency - materialized transitively
    pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = DependencyBuilder>) -> Self {
        self.artifact = self.artifact.dependencies(dependencies);
        self
    }

    pub fn scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    pub fn version_string(&self) -> &str {
        &self.artifact.version
    }

    /// the artifact this dependency refers to
    pub fn build(&self) -> ArtifactCreator {
        self.artifact.clone().build()
    }

    /// the entry in the parent's pom
    pub fn build_dependency(&self) -> Dependency {
        let artifact = &self.artifact;
        Dependency {
            group_id: artifact.group_id.clone(),
            artifact_id: artifact.artifact_id.clone(),
            version: artifact.version.clone(),
            dependency_type: (artifact.artifact_type != TYPE_JAR).then(|| artifact.artifact_type.clone()),
            classifier: artifact.classifier.clone(),
            scope: self.scope.clone(),
            optional: artifact.optional.clone(),
        }
    }
}


/// The collaborators and options used when writing artifacts to disk. The default writes exactly
///  the pom and (unless the type is "pom") an empty artifact file per artifact - nothing else.
pub struct Materializer {
    version_scheme: Box<dyn VersionScheme>,
    descriptor_writer: Box<dyn DescriptorWriter>,
    checksums: ChecksumPolicy,
    update_metadata: bool,
}
impl Default for Materializer {
    fn default() -> Self {
        Materializer {
            version_scheme: Box::new(GenericVersionScheme),
            descriptor_writer: Box::new(PomXmlWriter),
            checksums: ChecksumPolicy::None,
            update_metadata: false,
        }
    }
}
impl Materializer {
    pub fn with_version_scheme(mut self, version_scheme: impl VersionScheme + 'static) -> Self {
        self.version_scheme = Box::new(version_scheme);
        self
    }

    pub fn with_descriptor_writer(mut self, descriptor_writer: impl DescriptorWriter + 'static) -> Self {
        self.descriptor_writer = Box::new(descriptor_writer);
        self
    }

    pub fn with_checksums(mut self, checksums: ChecksumPolicy) -> Self {
        self.checksums = checksums;
        self
    }

    /// keep each artifact's maven-metadata.xml in sync with the versions written so far
    pub fn with_metadata(mut self, update_metadata: bool) -> Self {
        self.update_metadata = update_metadata;
        self
    }

    pub fn classify(&self, version: &str) -> VersionKind {
        classify_version(self.version_scheme.as_ref(), version)
    }
}


/// A fully configured artifact, ready to be written to a repository directory
#[derive(Debug, Clone)]
pub struct ArtifactCreator {
    coordinates: MavenCoordinates,
    artifact_type: String,
    classifier: MavenClassifier,
    dependencies: Vec<DependencyBuilder>,
}
impl ArtifactCreator {
    pub fn coordinates(&self) -> &MavenCoordinates {
        &self.coordinates
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    pub fn classifier(&self) -> &MavenClassifier {
        &self.classifier
    }

    pub fn dependencies(&self) -> &[DependencyBuilder] {
        &self.dependencies
    }

    pub fn pom_file(&self, repository_folder: &Path) -> PathBuf {
        resolve_in(repository_folder, &MavenArtifactRef::pom(&self.coordinates))
    }

    /// `None` for artifacts of type "pom", which have no file besides their pom
    pub fn artifact_file(&self, repository_folder: &Path) -> Option<PathBuf> {
        if self.artifact_type == TYPE_POM {
            return None;
        }

        Some(resolve_in(repository_folder, &MavenArtifactRef {
            coordinates: self.coordinates.clone(),
            classifier: self.classifier.clone(),
            extension: self.artifact_type.clone(),
        }))
    }

    pub fn create(&self, repository_folder: &Path) -> anyhow::Result<()> {
        self.create_with(repository_folder, &Materializer::default())
    }

    /// Writes this artifact's files, and - recursively - those of all dependencies that are not
    ///  version ranges. Range dependencies only show up in the pom.
    ///
    /// NB: there is no protection against cyclic dependencies
    pub fn create_with(&self, repository_folder: &Path, materializer: &Materializer) -> anyhow::Result<()> {
        debug!("creating {}:{}:{} ({}) in {}",
            self.coordinates.group_id.0, self.coordinates.artifact_id.0, self.coordinates.version.0,
            self.artifact_type, repository_folder.display());

        let mut project = Project::new(
            &self.coordinates.group_id.0,
            &self.coordinates.artifact_id.0,
            &self.coordinates.version.0,
            &self.artifact_type,
        );

        let mut maven_dependencies = Vec::with_capacity(self.dependencies.len());
        for dependency in &self.dependencies {
            let dependency_artifact = dependency.build();
            match materializer.classify(dependency.version_string()) {
                VersionKind::Exact => {
                    dependency_artifact.create_with(repository_folder, materializer)?;
                }
                VersionKind::Range => {
                    trace!("not creating dependency {}:{} - {} is a version range",
                        dependency_artifact.coordinates.group_id.0, dependency_artifact.coordinates.artifact_id.0, dependency.version_string());
                }
            }
            maven_dependencies.push(dependency.build_dependency());
        }
        project.set_dependencies(maven_dependencies);

        let pom_file = self.pom_file(repository_folder);
        if let Some(parent) = pom_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        if let Some(artifact_file) = self.artifact_file(repository_folder) {
            // only existence matters, so an existing file is left alone
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&artifact_file)
                .with_context(|| format!("failed to create artifact file {}", artifact_file.display()))?;
            write_checksums(&artifact_file, materializer.checksums)?;
        }

        let pom_content = materializer.descriptor_writer.write_descriptor(&project)?;
        fs::write(&pom_file, pom_content)
            .with_context(|| format!("failed to write pom file {}", pom_file.display()))?;
        write_checksums(&pom_file, materializer.checksums)?;

        if materializer.update_metadata {
            update_version_metadata(repository_folder, &self.coordinates.group_id, &self.coordinates.artifact_id, materializer.checksums)?;
        }

        Ok(())
    }
}
