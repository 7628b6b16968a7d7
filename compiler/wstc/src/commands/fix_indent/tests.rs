#![allow(clippy::unwrap_used, reason = "tests unwrap temporary filesystem setup")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn fixes_space_indented_files_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let spaced = dir.path().join("spaced.html");
    let tabbed = dir.path().join("tabbed.html");
    fs::write(&spaced, "<div>\n  <p></p>\n</div>\n").unwrap();
    fs::write(&tabbed, "<div>\n\t<p></p>\n</div>\n").unwrap();

    assert_eq!(fix_file(&spaced).unwrap(), FixResult::Fixed);
    assert_eq!(fix_file(&tabbed).unwrap(), FixResult::LooksGood);
    assert_eq!(
        fs::read_to_string(&spaced).unwrap(),
        "<div>\n\t<p></p>\n</div>\n"
    );
}

#[test]
fn command_walks_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    let nested = dir.path().join("nested/page.html");
    fs::write(&nested, "<ul>\n    <li></li>\n</ul>\n").unwrap();

    let arg = dir.path().to_string_lossy().into_owned();
    assert!(run_fix_indent(&[arg]));
    assert_eq!(
        fs::read_to_string(&nested).unwrap(),
        "<ul>\n\t<li></li>\n</ul>\n"
    );
}

#[test]
fn missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let arg = dir.path().join("missing").to_string_lossy().into_owned();
    assert!(!run_fix_indent(&[arg]));
}

#[test]
fn unknown_option_fails() {
    assert!(!run_fix_indent(&["--tabs".to_owned()]));
}
