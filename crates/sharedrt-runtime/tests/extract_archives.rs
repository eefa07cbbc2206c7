//! Extraction of real zip and tar.gz archives.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use sharedrt_core::Extractor;
use sharedrt_runtime::{ArchiveExtractor, ExtractError, ExtractSummary, extract_archive};
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

const RUNTIME_FILE: &str = "shared/Microsoft.NETCore.App/2.1.6/System.Runtime.dll";
const HOST_FILE: &str = "host/fxr/2.1.6/libhostfxr.so";

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.add_directory("shared/", options).unwrap();
    for (name, body) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn write_tar_gz(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    let mut dir_header = tar::Header::new_gnu();
    dir_header.set_entry_type(tar::EntryType::Directory);
    dir_header.set_mode(0o755);
    dir_header.set_size(0);
    builder
        .append_data(&mut dir_header, "shared/", std::io::empty())
        .unwrap();

    for (name, body) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, body.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap();
}

/// A tar.gz whose single entry is stored under `name` verbatim.
///
/// `Builder::append_data` refuses `..` components, so the name is written
/// into the header directly.
fn write_tar_gz_raw_name(path: &Path, name: &str, body: &str) {
    let file = fs::File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    let mut header = tar::Header::new_gnu();
    header.as_gnu_mut().unwrap().name[..name.len()].copy_from_slice(name.as_bytes());
    header.set_size(body.len() as u64);
    header.set_mode(0o644);
    header.set_entry_type(tar::EntryType::Regular);
    header.set_cksum();
    builder.append(&header, body.as_bytes()).unwrap();

    builder.into_inner().unwrap().finish().unwrap();
}

#[test]
fn zip_archive_expands_into_destination() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.zip");
    let dest = dir.path().join("dotnet");
    write_zip(&archive, &[(RUNTIME_FILE, "runtime"), (HOST_FILE, "host")]);

    let summary = extract_archive(&archive, &dest, false).unwrap();

    assert_eq!(
        summary,
        ExtractSummary {
            written: 2,
            skipped: 0
        }
    );
    assert_eq!(fs::read_to_string(dest.join(RUNTIME_FILE)).unwrap(), "runtime");
    assert_eq!(fs::read_to_string(dest.join(HOST_FILE)).unwrap(), "host");
}

#[test]
fn tar_gz_archive_expands_into_destination() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.tar.gz");
    let dest = dir.path().join("dotnet");
    write_tar_gz(&archive, &[(RUNTIME_FILE, "runtime"), (HOST_FILE, "host")]);

    let summary = extract_archive(&archive, &dest, false).unwrap();

    assert_eq!(summary.written, 2);
    assert_eq!(fs::read_to_string(dest.join(RUNTIME_FILE)).unwrap(), "runtime");
    assert!(dest.join("shared/Microsoft.NETCore.App/2.1.6").is_dir());
}

#[test]
fn existing_files_are_kept_without_overwrite() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.tar.gz");
    let dest = dir.path().join("dotnet");
    write_tar_gz(&archive, &[(RUNTIME_FILE, "new"), (HOST_FILE, "host")]);

    fs::create_dir_all(dest.join("shared/Microsoft.NETCore.App/2.1.6")).unwrap();
    fs::write(dest.join(RUNTIME_FILE), "old").unwrap();

    let summary = extract_archive(&archive, &dest, false).unwrap();

    assert_eq!(
        summary,
        ExtractSummary {
            written: 1,
            skipped: 1
        }
    );
    assert_eq!(fs::read_to_string(dest.join(RUNTIME_FILE)).unwrap(), "old");
}

#[test]
fn existing_files_are_replaced_with_overwrite() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.zip");
    let dest = dir.path().join("dotnet");
    write_zip(&archive, &[(RUNTIME_FILE, "new")]);

    fs::create_dir_all(dest.join("shared/Microsoft.NETCore.App/2.1.6")).unwrap();
    fs::write(dest.join(RUNTIME_FILE), "old").unwrap();

    let summary = extract_archive(&archive, &dest, true).unwrap();

    assert_eq!(summary.skipped, 0);
    assert_eq!(fs::read_to_string(dest.join(RUNTIME_FILE)).unwrap(), "new");
}

#[test]
fn corrupt_zip_is_an_error() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.zip");
    fs::write(&archive, "definitely not a zip").unwrap();

    assert!(extract_archive(&archive, &dir.path().join("out"), false).is_err());
}

#[test]
fn zip_entry_escaping_destination_is_rejected() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.zip");
    let dest = dir.path().join("dotnet");
    write_zip(&archive, &[("../evil.txt", "gotcha")]);

    let err = extract_archive(&archive, &dest, true).unwrap_err();

    assert!(matches!(err, ExtractError::UnsafeEntry { ref name } if name == "../evil.txt"));
    assert!(!dir.path().join("evil.txt").exists());
}

#[test]
fn tar_entry_escaping_destination_is_rejected() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.tar.gz");
    let dest = dir.path().join("dotnet");
    write_tar_gz_raw_name(&archive, "../evil.txt", "gotcha");

    let err = extract_archive(&archive, &dest, true).unwrap_err();

    assert!(matches!(err, ExtractError::UnsafeEntry { ref name } if name == "../evil.txt"));
    assert!(!dir.path().join("evil.txt").exists());
}

#[test]
fn tar_escape_is_rejected_even_when_target_exists() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.tar.gz");
    let dest = dir.path().join("dotnet");
    write_tar_gz_raw_name(&archive, "../evil.txt", "gotcha");
    fs::write(dir.path().join("evil.txt"), "original").unwrap();

    let err = extract_archive(&archive, &dest, false).unwrap_err();

    assert!(matches!(err, ExtractError::UnsafeEntry { .. }));
    assert_eq!(
        fs::read_to_string(dir.path().join("evil.txt")).unwrap(),
        "original"
    );
}

#[tokio::test]
async fn extractor_port_runs_off_the_async_runtime() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("runtime.tar.gz");
    let dest = dir.path().join("dotnet");
    write_tar_gz(&archive, &[(RUNTIME_FILE, "runtime")]);

    let extractor = ArchiveExtractor::new();
    extractor.extract(&archive, &dest, false).await.unwrap();

    assert!(dest.join(RUNTIME_FILE).is_file());
}

#[tokio::test]
async fn extractor_port_reports_missing_archive() {
    let dir = tempdir().unwrap();
    let extractor = ArchiveExtractor::new();

    let err = extractor
        .extract(&dir.path().join("missing.zip"), dir.path(), false)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("missing.zip"));
}
