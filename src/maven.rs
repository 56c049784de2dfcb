pub mod artifact_creator;
pub mod checksums;
pub mod coordinates;
pub mod metadata_xml;
pub mod paths;
pub mod pom;
pub mod version_scheme;
