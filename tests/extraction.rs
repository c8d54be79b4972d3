mod common;

use common::{dir, file, write_zip};
use goswitch::GoSwitchError;
use goswitch::libs::utilities::compression::extract_zip;
use std::fs;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Every file under `root`, relative to it.
fn files_under(root: &std::path::Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

#[test]
fn well_formed_archive_is_extracted() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("go.zip");
    write_zip(
        &archive,
        &[
            dir("go/"),
            file("go/VERSION", b"go1.22.0\n"),
            file("go/bin/go.exe", b"binary"),
        ],
    );

    let dest = tmp.path().join("out");
    let written = extract_zip(&archive, &dest).unwrap();

    assert_eq!(written, 2);
    assert_eq!(files_under(&dest), vec!["go/VERSION", "go/bin/go.exe"]);
    assert_eq!(fs::read(dest.join("go/bin/go.exe")).unwrap(), b"binary");
}

#[cfg(unix)]
#[test]
fn unix_permissions_are_applied() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("go.zip");
    write_zip(&archive, &[file("go/bin/go", b"#!/bin/sh\n")]);

    let dest = tmp.path().join("out");
    extract_zip(&archive, &dest).unwrap();

    let mode = fs::metadata(dest.join("go/bin/go")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn zip_slip_entry_rejects_the_whole_archive() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("evil.zip");
    write_zip(
        &archive,
        &[
            file("go/VERSION", b"go1.22.0\n"),
            file("../../evil.txt", b"pwned"),
        ],
    );

    let dest = tmp.path().join("a").join("b").join("out");
    let err = extract_zip(&archive, &dest).unwrap_err();

    assert!(matches!(err, GoSwitchError::UnsafeArchiveEntry { .. }));
    // Only the archive itself exists: the valid entry listed before the bad one was not
    // written either.
    assert_eq!(files_under(tmp.path()), vec!["evil.zip"]);
}

#[test]
fn sibling_prefix_entry_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("evil.zip");
    write_zip(&archive, &[file("../out-evil/x.txt", b"pwned")]);

    let dest = tmp.path().join("out");
    assert!(extract_zip(&archive, &dest).is_err());
    assert!(!tmp.path().join("out-evil").exists());
}

#[test]
fn absolute_entry_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("evil.zip");
    let absolute = tmp.path().join("abs-evil.txt");
    let name = absolute.to_string_lossy().into_owned();
    write_zip(&archive, &[file(&name, b"pwned")]);

    let dest = tmp.path().join("out");
    assert!(extract_zip(&archive, &dest).is_err());
    assert!(!absolute.exists());
}

#[test]
fn corrupt_archive_is_an_archive_error() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("broken.zip");
    fs::write(&archive, b"this is not a zip file").unwrap();

    let err = extract_zip(&archive, &tmp.path().join("out")).unwrap_err();
    assert!(matches!(err, GoSwitchError::Archive(_)));
}
