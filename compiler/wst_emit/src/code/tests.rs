use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn code(lines: &[&str]) -> Code {
    let mut code = Code::new();
    for line in lines {
        code.push_line(line);
    }
    code
}

#[test]
fn blocks_indent_their_bodies() {
    let out = code(&["function a() {", "const e0 = 1;", "return e0;", "}"]).render();
    assert_eq!(out, "function a() {\n\tconst e0 = 1;\n\treturn e0;\n}\n");
}

#[test]
fn else_line_closes_and_opens() {
    let out = code(&["if (x) {", "a();", "} else {", "b();", "}"]).render();
    assert_eq!(out, "if (x) {\n\ta();\n} else {\n\tb();\n}\n");
}

#[test]
fn callback_close_dedents() {
    let out = code(&["e0.addEventListener('click', (event) => {", "go();", "});"]).render();
    assert_eq!(
        out,
        "e0.addEventListener('click', (event) => {\n\tgo();\n});\n"
    );
}

#[test]
fn depth_never_goes_negative() {
    let mut c = code(&["}", "}"]);
    assert_eq!(c.depth(), 0);
    c.dedent();
    assert_eq!(c.depth(), 0);
    c.push_line("x;");
    assert_eq!(c.render(), "}\n}\nx;\n");
}

#[test]
fn explicit_indent_and_dedent() {
    let mut c = Code::new();
    c.push_line("a(");
    c.indent();
    c.push_line("b,");
    c.dedent();
    c.push_line(");");
    assert_eq!(c.render(), "a(\n\tb,\n);\n");
}

#[test]
fn input_whitespace_is_replaced_by_depth() {
    let out = code(&["  {", "\t\t  x;  ", "}"]).render();
    assert_eq!(out, "{\n\tx;\n}\n");
}

#[test]
fn verbatim_body_restores_depth() {
    let mut c = code(&["f(() => {"]);
    c.push_verbatim("if (a) {\n\n  b();\n");
    assert_eq!(c.depth(), 1);
    c.push_line("});");
    assert_eq!(c.render(), "f(() => {\n\tif (a) {\n\t\tb();\n});\n");
}

#[test]
fn push_all_nests_at_current_depth() {
    let inner = code(&["if (y) {", "z();", "}"]);
    let mut outer = code(&["function g() {"]);
    outer.push_all(&inner);
    outer.push_line("}");
    assert_eq!(
        outer.render(),
        "function g() {\n\tif (y) {\n\t\tz();\n\t}\n}\n"
    );
}

#[test]
fn spaces_style() {
    let out = code(&["{", "x;", "}"])
        .with_indent_style(IndentStyle::Spaces)
        .render();
    assert_eq!(out, "{\n    x;\n}\n");
}

#[test]
fn minified_output_concatenates_lines() {
    let mut c = code(&["function a() {", "", "const e0 = 1;", "return e0;", "}"]).minified(true);
    c.push_line("a();");
    assert_eq!(c.render(), "function a() {const e0 = 1;return e0;}a();");
}

#[test]
fn minified_verbatim_lines_keep_their_line_break() {
    let mut c = code(&["f(() => {"]).minified(true);
    c.push_verbatim("go() // start\n\tcount++\n");
    c.push_line("});");
    c.push_line("done();");
    assert_eq!(c.render(), "f(() => {go() // start\ncount++\n});done();");
}

#[test]
fn push_all_keeps_verbatim_lines() {
    let mut inner = Code::new();
    inner.push_verbatim("a() // x");
    let mut outer = Code::new().minified(true);
    outer.push_all(&inner);
    outer.push_line("b();");
    assert_eq!(outer.render(), "a() // x\nb();");
}

#[test]
fn blank_lines_survive_non_minified_output() {
    assert_eq!(code(&["a;", "", "b;"]).render(), "a;\n\nb;\n");
}

#[test]
fn write_to_matches_render() {
    let c = code(&["if (x) {", "y();", "}"]);
    let mut sink = Vec::new();
    assert!(c.write_to(&mut sink).is_ok());
    assert_eq!(String::from_utf8_lossy(&sink), c.render());
}

#[test]
fn lines_are_stored_trimmed() {
    let c = code(&["  a {", " b; "]);
    assert_eq!(c.lines().collect::<Vec<_>>(), vec!["a {", "b;"]);
    assert_eq!(c.len(), 2);
    assert!(!c.is_empty());
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn minify_only_changes_whitespace(
        lines in prop::collection::vec(
            prop_oneof![
                Just("function f(a) {".to_owned()),
                Just("}".to_owned()),
                Just("} else {".to_owned()),
                Just(String::new()),
                "[a-z0-9 ().;'=]{0,20}",
            ],
            0..30,
        )
    ) {
        let mut plain = Code::new();
        let mut minified = Code::new().minified(true);
        for line in &lines {
            plain.push_line(line);
            minified.push_line(line);
        }
        prop_assert_eq!(
            strip_whitespace(&minified.render()),
            strip_whitespace(&plain.render())
        );
    }
}
