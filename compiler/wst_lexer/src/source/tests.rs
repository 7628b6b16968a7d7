use super::*;
use pretty_assertions::assert_eq;

fn lines(source: &SourceText) -> Vec<(u32, String)> {
    source
        .numbered_lines()
        .map(|(n, line)| (n, line.to_owned()))
        .collect()
}

#[test]
fn keeps_line_terminators() {
    let source = SourceText::new("<div>\n\t<p>\n</div>").unwrap();
    assert_eq!(
        lines(&source),
        vec![
            (1, "<div>\n".to_owned()),
            (2, "\t<p>\n".to_owned()),
            (3, "</div>".to_owned()),
        ]
    );
    assert_eq!(source.len(), 3);
}

#[test]
fn strips_utf8_bom() {
    let source = SourceText::new("\u{FEFF}<!DOCTYPE html>\n").unwrap();
    assert_eq!(lines(&source), vec![(1, "<!DOCTYPE html>\n".to_owned())]);
}

#[test]
fn empty_text_has_no_lines() {
    let source = SourceText::new("").unwrap();
    assert!(source.is_empty());
}

#[test]
fn rejects_space_indentation_with_line_number() {
    let err = SourceText::new("<div>\n\t<p>\n    <b>\n").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::SpaceIndentation);
    assert_eq!(err.line, 3);
}

#[test]
fn accepts_whitespace_only_lines() {
    let source = SourceText::new("<div>\n   \n</div>\n").unwrap();
    assert_eq!(source.len(), 3);
}

#[test]
fn accepts_spaces_after_tabs() {
    assert!(SourceText::new("\t  <p>\n").is_ok());
}
