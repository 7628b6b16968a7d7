#![allow(clippy::unwrap_used, reason = "tests unwrap known-good input")]

use pretty_assertions::assert_eq;
use wst_lexer::LexErrorKind;

use super::*;

#[test]
fn dumps_tokens_and_tag_sub_tokens() {
    let dump = dump_tokens("<a id=x hidden>Go</a>", false).unwrap();
    assert_eq!(
        dump,
        "  {Tag, <a id=x hidden>, 1:1}\n\
         \x20     <TagName, a>\n\
         \x20     <Attribute, id=x>\n\
         \x20     <AttributeName, hidden>\n\
         \x20 {Data, Go, 1:16}\n\
         \x20 {ClosingTag, </a>, 1:18}\n"
    );
}

#[test]
fn reports_lex_errors() {
    let err = dump_tokens("<div>\n<!-- open", false).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnclosedComment);
}

#[test]
fn missing_file_fails() {
    assert!(!lex_file("/nonexistent/wst/page.html", false));
}
