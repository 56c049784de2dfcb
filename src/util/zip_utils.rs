use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::trace;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;


/// Content for a single ZIP entry. The alias is used verbatim as the entry name, so it may
///  contain '/' to place the entry in a folder.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ZipResource {
    pub content: Vec<u8>,
    pub alias: String,
}
impl ZipResource {
    pub fn new(content: impl Into<Vec<u8>>, alias: impl Into<String>) -> ZipResource {
        ZipResource {
            content: content.into(),
            alias: alias.into(),
        }
    }
}

/// Writes all resources to `target_file` in the given order, replacing the file if it exists.
///
/// NB: a partially written file is left behind on failure
pub fn compress(target_file: &Path, resources: &[ZipResource]) -> anyhow::Result<()> {
    do_compress(target_file, resources)
        .with_context(|| format!("failed to write ZIP file {}", target_file.display()))
}

fn do_compress(target_file: &Path, resources: &[ZipResource]) -> anyhow::Result<()> {
    let mut out = ZipWriter::new(File::create(target_file)?);

    for resource in resources {
        trace!("adding {} ({} bytes) to {}", resource.alias, resource.content.len(), target_file.display());
        out.start_file(resource.alias.as_str(), SimpleFileOptions::default())?;
        out.write_all(&resource.content)?;
    }

    out.finish()?;
    Ok(())
}
