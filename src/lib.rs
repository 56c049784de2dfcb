//! Synthetic Maven repositories on disk, for integration tests of build and dependency tooling.
//!
//! ```no_run
//! use maven_test_repository::{artifact, dependency, MavenRepository};
//!
//! # fn main() -> anyhow::Result<()> {
//! let repository = MavenRepository::with_artifacts([
//!     artifact("com.acme", "lib", "1.0")
//!         .dependencies([
//!             dependency("com.acme", "core", "1.0").scope("compile"),
//!             dependency("com.acme", "api", "[1.0,2.0)"),
//!         ])
//!         .build(),
//! ])?;
//!
//! // com/acme/lib/1.0 and com/acme/core/1.0 exist, com/acme/api does not
//! assert!(repository.root().join("com/acme/core/1.0/core-1.0.jar").is_file());
//! # Ok(())
//! # }
//! ```

pub mod maven;
pub mod repository;
pub mod util;

pub use maven::artifact_creator::{artifact, dependency, ArtifactBuilder, ArtifactCreator, DependencyBuilder, Materializer};
pub use maven::checksums::ChecksumPolicy;
pub use repository::{MavenRepository, MavenRepositoryBuilder};
pub use util::zip_utils::{compress, ZipResource};
