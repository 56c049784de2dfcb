use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sha1::{Digest, Sha1};
use tracing::trace;


/// Which checksum sidecar files accompany every file written to a repository. Resolvers are
///  usually configured to warn (or fail) when these are missing.
#[derive(Debug, Default, Eq, PartialEq, Clone, Copy)]
pub enum ChecksumPolicy {
    #[default]
    None,
    Sha1,
    Sha1AndMd5,
}

pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(md5::compute(data).0)
}

/// Writes "<file>.sha1" and / or "<file>.md5" next to `file`, based on its current content
pub fn write_checksums(file: &Path, policy: ChecksumPolicy) -> anyhow::Result<()> {
    if policy == ChecksumPolicy::None {
        return Ok(());
    }

    let data = fs::read(file)
        .with_context(|| format!("failed to read {} for checksumming", file.display()))?;

    write_sidecar(file, "sha1", &sha1_hex(&data))?;
    if policy == ChecksumPolicy::Sha1AndMd5 {
        write_sidecar(file, "md5", &md5_hex(&data))?;
    }
    Ok(())
}

fn sidecar_path(file: &Path, extension: &str) -> PathBuf {
    let mut file_name = file.file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    file_name.push(".");
    file_name.push(extension);
    file.with_file_name(file_name)
}

fn write_sidecar(file: &Path, extension: &str, hash: &str) -> anyhow::Result<()> {
    let path = sidecar_path(file, extension);
    trace!("writing checksum {}", path.display());
    fs::write(&path, hash)
        .with_context(|| format!("failed to write checksum file {}", path.display()))
}


#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    #[rstest]
    #[case::empty(b"", "da39a3ee5e6b4b0d3255bfef95601890afd80709", "d41d8cd98f00b204e9800998ecf8427e")]
    #[case::abc(b"abc", "a9993e364706816aba3e25717850c26c9cd0d89d", "900150983cd24fb0d6963f7d28e17f72")]
    fn test_hashes(#[case] data: &[u8], #[case] sha1: &str, #[case] md5: &str) {
        assert_eq!(sha1_hex(data), sha1);
        assert_eq!(md5_hex(data), md5);
    }

    #[rstest]
    #[case::none(ChecksumPolicy::None, false, false)]
    #[case::sha1(ChecksumPolicy::Sha1, true, false)]
    #[case::both(ChecksumPolicy::Sha1AndMd5, true, true)]
    fn test_write_checksums(#[case] policy: ChecksumPolicy, #[case] expect_sha1: bool, #[case] expect_md5: bool) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib-1.0.jar");
        fs::write(&file, b"abc").unwrap();

        write_checksums(&file, policy).unwrap();

        let sha1_file = dir.path().join("lib-1.0.jar.sha1");
        let md5_file = dir.path().join("lib-1.0.jar.md5");
        assert_eq!(sha1_file.exists(), expect_sha1);
        assert_eq!(md5_file.exists(), expect_md5);
        if expect_sha1 {
            assert_eq!(fs::read_to_string(sha1_file).unwrap(), "a9993e364706816aba3e25717850c26c9cd0d89d");
        }
        if expect_md5 {
            assert_eq!(fs::read_to_string(md5_file).unwrap(), "900150983cd24fb0d6963f7d28e17f72");
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_checksums(&dir.path().join("nope.jar"), ChecksumPolicy::Sha1).is_err());
    }
}
