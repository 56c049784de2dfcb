use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;
use tracing::debug;

use crate::maven::artifact_creator::{ArtifactCreator, Materializer};


/// A Maven repository in a temporary directory, for the lifetime of a test. The initial artifacts
///  are written on creation, more can be added at any time, and the whole directory is removed
///  when the repository is dropped.
pub struct MavenRepository {
    root: TempDir,
    materializer: Materializer,
}
impl MavenRepository {
    pub fn builder() -> MavenRepositoryBuilder {
        MavenRepositoryBuilder::default()
    }

    /// an empty repository in a fresh temporary directory
    pub fn new() -> anyhow::Result<MavenRepository> {
        Self::builder().create()
    }

    pub fn with_artifacts(initial_artifacts: impl IntoIterator<Item = ArtifactCreator>) -> anyhow::Result<MavenRepository> {
        Self::builder()
            .initial_artifacts(initial_artifacts)
            .create()
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn add_artifacts<'a>(&self, artifacts: impl IntoIterator<Item = &'a ArtifactCreator>) -> anyhow::Result<()> {
        for artifact in artifacts {
            artifact.create_with(self.root(), &self.materializer)?;
        }
        Ok(())
    }

    /// Removes the repository directory, reporting failure - dropping it does the same silently
    pub fn close(self) -> anyhow::Result<()> {
        let root = self.root.path().to_path_buf();
        debug!("removing maven repository {}", root.display());
        self.root.close()
            .with_context(|| format!("failed to remove maven repository {}", root.display()))
    }
}


#[derive(Default)]
pub struct MavenRepositoryBuilder {
    parent: Option<PathBuf>,
    materializer: Materializer,
    initial_artifacts: Vec<ArtifactCreator>,
}
impl MavenRepositoryBuilder {
    /// the repository is created as a new temporary directory *inside* `parent`, which must exist
    pub fn parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn materializer(mut self, materializer: Materializer) -> Self {
        self.materializer = materializer;
        self
    }

    /// written in the given order when the repository is created
    pub fn initial_artifacts(mut self, initial_artifacts: impl IntoIterator<Item = ArtifactCreator>) -> Self {
        self.initial_artifacts = initial_artifacts.into_iter().collect();
        self
    }

    pub fn create(self) -> anyhow::Result<MavenRepository> {
        let root = match &self.parent {
            None => TempDir::new()
                .context("failed to create temporary maven repository")?,
            Some(parent) => TempDir::new_in(parent)
                .with_context(|| format!("failed to create temporary maven repository in {}", parent.display()))?,
        };
        debug!("created maven repository {}", root.path().display());

        let repository = MavenRepository {
            root,
            materializer: self.materializer,
        };
        repository.add_artifacts(&self.initial_artifacts)?;
        Ok(repository)
    }
}
