use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::maven::coordinates::MAVEN_MODEL_VERSION;

pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const POM_SCHEMA_LOCATION: &str = "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;


/// The subset of a pom.xml that synthetic test artifacts need. Field order is the order the
///  POM schema requires.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename = "project", rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,
    #[serde(rename = "@xmlns:xsi", default)]
    pub xmlns_xsi: String,
    #[serde(rename = "@xsi:schemaLocation", default)]
    pub schema_location: String,

    pub model_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dependencies: Option<Dependencies>,
}
impl Project {
    pub fn new(group_id: &str, artifact_id: &str, version: &str, packaging: &str) -> Project {
        Project {
            xmlns: POM_NAMESPACE.to_string(),
            xmlns_xsi: XSI_NAMESPACE.to_string(),
            schema_location: POM_SCHEMA_LOCATION.to_string(),
            model_version: MAVEN_MODEL_VERSION.to_string(),
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            packaging: packaging.to_string(),
            dependencies: None,
        }
    }

    /// An empty list leaves the project without a <dependencies> section altogether
    pub fn set_dependencies(&mut self, dependencies: Vec<Dependency>) {
        self.dependencies = if dependencies.is_empty() {
            None
        }
        else {
            Some(Dependencies { dependency: dependencies })
        };
    }

    pub fn dependency_list(&self) -> &[Dependency] {
        match &self.dependencies {
            None => &[],
            Some(d) => &d.dependency,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Dependencies {
    #[serde(default)]
    pub dependency: Vec<Dependency>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub dependency_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub classifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub optional: Option<String>,
}


/// Turns a descriptor model into the bytes of a descriptor file
pub trait DescriptorWriter {
    fn write_descriptor(&self, project: &Project) -> anyhow::Result<Vec<u8>>;
}

/// Writes UTF-8 pom.xml files with an XML declaration and two-space indentation
#[derive(Debug, Default, Clone, Copy)]
pub struct PomXmlWriter;

impl DescriptorWriter for PomXmlWriter {
    fn write_descriptor(&self, project: &Project) -> anyhow::Result<Vec<u8>> {
        let xml = to_xml_document("project", project)
            .with_context(|| format!("failed to serialize pom for {}:{}:{}", project.group_id, project.artifact_id, project.version))?;
        Ok(xml.into_bytes())
    }
}

/// `value` as a standalone XML document, with declaration and trailing newline
pub fn to_xml_document<T: Serialize>(root_tag: &str, value: &T) -> anyhow::Result<String> {
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');

    let mut serializer = quick_xml::se::Serializer::with_root(&mut xml, Some(root_tag))?;
    serializer.indent(' ', 2);
    value.serialize(serializer)?;

    xml.push('\n');
    Ok(xml)
}

pub fn read_descriptor(xml: &str) -> anyhow::Result<Project> {
    Ok(quick_xml::de::from_str(xml)?)
}
