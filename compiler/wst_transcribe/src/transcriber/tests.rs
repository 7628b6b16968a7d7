use super::*;
use crate::error::ErrorKind;
use crate::transcribe_source;
use pretty_assertions::assert_eq;
use wst_lexer::LexErrorKind;

fn names() -> OutputNames {
    OutputNames {
        function: "page".to_owned(),
        script: "page.js".to_owned(),
    }
}

fn plain() -> FileOptions {
    FileOptions {
        minify: false,
        ..FileOptions::default()
    }
}

fn render(src: &str, options: &FileOptions) -> String {
    transcribe_source(src, &names(), options)
        .expect("transcription should succeed")
        .render()
}

fn fail(src: &str, options: &FileOptions) -> TranscribeError {
    transcribe_source(src, &names(), options).expect_err("transcription should fail")
}

fn lines(src: &str, options: &FileOptions) -> Vec<String> {
    render(src, options)
        .lines()
        .map(|l| l.trim().to_owned())
        .collect()
}

// ─── Basic Shape ───────────────────────────────────────────────

#[test]
fn element_tree_with_text() {
    let out = render(
        "<!DOCTYPE html><div id=\"x\"><p>Hi</p></div>",
        &plain(),
    );
    assert_eq!(
        out,
        "function page() {\n\
         \tconst e0 = document.createElement('div');\n\
         \te0.setAttribute('id', 'x');\n\
         \tconst e1 = document.createElement('p');\n\
         \te0.appendChild(e1);\n\
         \te1.appendChild(document.createTextNode('Hi'));\n\
         \treturn e0;\n\
         }\n"
    );
}

#[test]
fn minified_by_default() {
    let out = render(
        "<!DOCTYPE html><div id=\"x\"><p>Hi</p></div>",
        &FileOptions::default(),
    );
    assert_eq!(
        out,
        "function page() {const e0 = document.createElement('div');\
         e0.setAttribute('id', 'x');\
         const e1 = document.createElement('p');\
         e0.appendChild(e1);\
         e1.appendChild(document.createTextNode('Hi'));\
         return e0;}"
    );
}

#[test]
fn indented_source_file() {
    let src = "<!DOCTYPE html>\n\
               <ul class=\"menu\">\n\
               \t<li>\n\
               \t\tHome\n\
               \t</li>\n\
               \t<li>About\n\
               \t\tus</li>\n\
               </ul>\n";
    assert_eq!(
        lines(src, &plain()),
        vec![
            "function page() {",
            "const e0 = document.createElement('ul');",
            "e0.setAttribute('class', 'menu');",
            "const e1 = document.createElement('li');",
            "e0.appendChild(e1);",
            "e1.appendChild(document.createTextNode('Home'));",
            "const e2 = document.createElement('li');",
            "e0.appendChild(e2);",
            "e2.appendChild(document.createTextNode('About\\nus'));",
            "return e0;",
            "}",
        ]
    );
}

#[test]
fn whitespace_only_text_is_skipped() {
    let out = render("<!DOCTYPE html>\n<div>  \t  </div>\n", &plain());
    assert!(!out.contains("createTextNode"));
}

#[test]
fn unclosed_elements_at_end_are_accepted() {
    let out = render("<!DOCTYPE html>\n<div><p>text", &plain());
    assert!(out.ends_with("\treturn e0;\n}\n"));
}

// ─── Attributes ────────────────────────────────────────────────

#[test]
fn boolean_attribute_is_true() {
    let out = render("<!DOCTYPE html><form><input disabled></form>", &plain());
    assert!(out.contains("\te1.setAttribute('disabled', true);\n"));
}

#[test]
fn event_attribute_registers_listener() {
    let out = render(
        "<!DOCTYPE html><div><button onclick=\"count += 1\">Go</button></div>",
        &plain(),
    );
    assert!(out.contains(
        "\te1.addEventListener('click', (event) => {\n\
         \t\tcount += 1\n\
         \t});\n"
    ));
    assert!(!out.contains("setAttribute('onclick'"));
}

#[test]
fn event_attribute_with_braces() {
    let out = render(
        "<!DOCTYPE html><div onKeyDown={if (event.key === 'Enter') { go(); }}></div>",
        &plain(),
    );
    assert!(out.contains("\te0.addEventListener('keydown', (event) => {\n"));
    assert!(out.contains("\t\tif (event.key === 'Enter') { go(); }\n\t});\n"));
}

#[test]
fn minified_listener_with_line_comment_keeps_following_code() {
    let out = render(
        "<!DOCTYPE html><div><button onclick=\"go() // start\">Go</button><p>After</p></div>",
        &FileOptions::default(),
    );
    assert_eq!(
        out,
        "function page() {const e0 = document.createElement('div');\
         const e1 = document.createElement('button');\
         e1.addEventListener('click', (event) => {go() // start\n});\
         e0.appendChild(e1);e1.appendChild(document.createTextNode('Go'));\
         const e2 = document.createElement('p');e0.appendChild(e2);\
         e2.appendChild(document.createTextNode('After'));return e0;}"
    );
}

#[test]
fn multi_line_listener_keeps_its_lines() {
    let src = "<!DOCTYPE html>\n<div>\n\t<button onclick=\"\n\t\tcount++\n\t\tshow()\n\t\">Go</button>\n</div>\n";
    let out = render(src, &plain());
    assert!(out.contains(
        "\te1.addEventListener('click', (event) => {\n\
         \t\tcount++\n\
         \t\tshow()\n\
         \t});\n"
    ));

    let minified = render(src, &FileOptions::default());
    assert!(minified.contains("(event) => {count++\nshow()\n});"));
}

#[test]
fn multi_line_plain_value_is_joined() {
    let out = render(
        "<!DOCTYPE html>\n<div class=\"card\n\t\twide\"\n\tid=\"x\">\n</div>\n",
        &plain(),
    );
    assert!(out.contains("\te0.setAttribute('class', 'card wide');\n"));
    assert!(out.contains("\te0.setAttribute('id', 'x');\n"));
}

#[test]
fn unknown_on_attribute_is_plain() {
    let out = render("<!DOCTYPE html><div onion=\"yes\"></div>", &plain());
    assert!(out.contains("e0.setAttribute('onion', 'yes');"));
}

#[test]
fn expression_values_are_verbatim() {
    let out = render("<!DOCTYPE html><p><input value={ 1 + 2 } /></p>", &plain());
    assert!(out.contains("e1.setAttribute('value', 1 + 2);"));
}

#[test]
fn quoted_and_bare_values_are_string_literals() {
    let out = render(
        "<!DOCTYPE html><td colspan=2 title=\"it's\"></td>",
        &plain(),
    );
    assert!(out.contains("e0.setAttribute('colspan', '2');"));
    assert!(out.contains("e0.setAttribute('title', 'it\\'s');"));
}

// ─── Stack Discipline ──────────────────────────────────────────

#[test]
fn void_elements_are_not_pushed() {
    let out = render(
        "<!DOCTYPE html><div><br><img src=\"a.png\"></br><p>x</p></div>",
        &plain(),
    );
    assert!(out.contains("e0.appendChild(e1);"));
    assert!(out.contains("e0.appendChild(e2);"));
    assert!(out.contains("e0.appendChild(e3);"));
    assert!(out.contains("e3.appendChild(document.createTextNode('x'));"));
}

#[test]
fn mismatched_closing_tag_is_an_error() {
    let err = fail("<!DOCTYPE html>\n<div>\n</span>\n</div>\n", &plain());
    assert_eq!(
        err,
        TranscribeError::TagMismatch {
            expected: "div".to_owned(),
            found: "span".to_owned(),
            line: 3,
        }
    );
    assert_eq!(err.kind(), ErrorKind::TagMismatch);
    let message = err.to_string();
    assert!(message.contains("div") && message.contains("span") && message.contains('3'));
}

#[test]
fn lenient_mode_keeps_stack() {
    let options = FileOptions {
        lenient_closing_tags: true,
        ..plain()
    };
    let out = render(
        "<!DOCTYPE html>\n<div>\n</span>\n<p>x</p>\n</div>\n",
        &options,
    );
    assert!(out.contains("e0.appendChild(e1);"));
    assert!(out.ends_with("\treturn e0;\n}\n"));
}

#[test]
fn closing_tag_names_are_case_insensitive() {
    let out = render("<!DOCTYPE html><DIV><P>x</p></Div>", &plain());
    assert!(out.contains("document.createElement('div')"));
}

#[test]
fn stack_underflow() {
    let err = fail("<!DOCTYPE html>\n<div></div>\n</p>\n", &plain());
    assert_eq!(
        err,
        TranscribeError::Structural(StructuralError::StackUnderflow {
            tag: "p".to_owned(),
            line: 3,
        })
    );
}

// ─── SVG ───────────────────────────────────────────────────────

#[test]
fn svg_subtree_uses_namespace_and_relaxed_closing() {
    let src = "<!DOCTYPE html>\n\
               <div>\n\
               \t<svg viewBox=\"0 0 10 10\">\n\
               \t\t<g>\n\
               \t\t\t<circle r=\"1\"/>\n\
               \t\t\t<path d=\"M0 0\"></path>\n\
               \t\t</g>\n\
               \t</svg>\n\
               \t<p>after</p>\n\
               </div>\n";
    let out = lines(src, &plain());
    let ns = "document.createElementNS('http://www.w3.org/2000/svg',";
    assert!(out.contains(&format!("const e1 = {ns} 'svg');")));
    assert!(out.contains(&format!("const e2 = {ns} 'g');")));
    assert!(out.contains(&format!("const e3 = {ns} 'circle');")));
    assert!(out.contains(&format!("const e4 = {ns} 'path');")));
    assert!(out.contains(&"e2.appendChild(e3);".to_owned()));
    assert!(out.contains(&"e2.appendChild(e4);".to_owned()));
    assert!(out.contains(&"const e5 = document.createElement('p');".to_owned()));
    assert!(out.contains(&"e0.appendChild(e5);".to_owned()));
}

#[test]
fn svg_close_unwinds_open_children() {
    let out = render(
        "<!DOCTYPE html><div><svg><g><rect></svg><p>x</p></div>",
        &plain(),
    );
    assert!(out.contains("e0.appendChild(e4);"));
    assert!(out.ends_with("\treturn e0;\n}\n"));
}

#[test]
fn nested_svg_keeps_outer_context() {
    let out = render(
        "<!DOCTYPE html><svg><svg></svg><g></g></svg>",
        &plain(),
    );
    assert!(out.contains("const e2 = document.createElementNS("));
    assert!(out.contains("e0.appendChild(e2);"));
}

// ─── Structural Errors ─────────────────────────────────────────

#[test]
fn two_base_elements() {
    let err = fail("<!DOCTYPE html>\n<div></div>\n<span></span>\n", &plain());
    assert_eq!(
        err,
        TranscribeError::Structural(StructuralError::DuplicateBaseElement {
            first: "div".to_owned(),
            second: "span".to_owned(),
        })
    );
    assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn void_base_element() {
    let err = fail("<!DOCTYPE html>\n<br>\n", &plain());
    assert_eq!(
        err,
        TranscribeError::Structural(StructuralError::VoidBaseElement {
            tag: "br".to_owned()
        })
    );
}

#[test]
fn missing_base_element() {
    let err = fail("<!DOCTYPE html>\n", &plain());
    assert_eq!(
        err,
        TranscribeError::Structural(StructuralError::MissingBaseElement)
    );
}

#[test]
fn missing_doctype() {
    let err = fail("<div></div>", &plain());
    assert_eq!(
        err,
        TranscribeError::Structural(StructuralError::MissingDoctype {
            found: "<div>".to_owned()
        })
    );
}

#[test]
fn text_outside_element() {
    let err = fail("<!DOCTYPE html>\n<div></div>\nhello\n", &plain());
    assert_eq!(
        err,
        TranscribeError::Structural(StructuralError::TextOutsideElement { line: 3 })
    );
}

#[test]
fn element_without_name() {
    let nodes = vec![Node::Element {
        tokens: Vec::new(),
        self_closed: false,
        line: 9,
    }];
    let options = plain();
    let names = names();
    let err = Transcriber::new(&names, &options)
        .transcribe(&nodes)
        .unwrap_err();
    assert_eq!(
        err,
        TranscribeError::Structural(StructuralError::MissingTagName { line: 9 })
    );
}

#[test]
fn lexer_errors_pass_through() {
    let err = fail("<!DOCTYPE html>\n<div><!-- never closed", &plain());
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert!(matches!(
        err,
        TranscribeError::Lex(ref e) if e.kind == LexErrorKind::UnclosedComment
    ));
}

// ─── Entities ──────────────────────────────────────────────────

#[test]
fn entities_route_through_decoder() {
    let out = render("<!DOCTYPE html><p>Fish &amp; chips</p>", &plain());
    assert!(out.contains("e0.appendChild(document.createTextNode(dec('Fish &amp; chips')));"));
    assert!(out.ends_with(
        "}\n\
         function dec(data) {\n\
         \tconst e = document.createElement('textarea');\n\
         \te.innerHTML = data;\n\
         \treturn e.value;\n\
         }\n"
    ));
}

#[test]
fn decoder_is_emitted_once() {
    let out = render("<!DOCTYPE html><p>&lt;<b>&gt;</b></p>", &plain());
    assert_eq!(out.matches("function dec(data)").count(), 1);
    assert_eq!(out.matches("dec('").count(), 2);
}

#[test]
fn decoding_can_be_disabled() {
    let options = FileOptions {
        decode_entities: false,
        ..plain()
    };
    let out = render("<!DOCTYPE html><p>&copy;</p>", &options);
    assert!(out.contains("createTextNode('&copy;')"));
    assert!(!out.contains("function dec"));
}

#[test]
fn raw_text_is_never_decoded() {
    let out = render(
        "<!DOCTYPE html><div><script>let a = '&amp;';</script></div>",
        &plain(),
    );
    assert!(out.contains("e1.appendChild(document.createTextNode('let a = \\'&amp;\\';'));"));
    assert!(!out.contains("dec("));
}

// ─── Parameters and Behavior ───────────────────────────────────

#[test]
fn return_parameters_are_arguments() {
    let options = FileOptions {
        parameters: vec!["title".to_owned(), "href".to_owned()],
        ..plain()
    };
    let out = lines(
        "<!DOCTYPE html><a href=\"${href}\">${title}</a>",
        &options,
    );
    assert_eq!(out[0], "function page(title, href) {");
    assert!(out.contains(&"e0.setAttribute('href', `${href}`);".to_owned()));
    assert!(out.contains(&"e0.appendChild(document.createTextNode(`${title}`));".to_owned()));
}

#[test]
fn placeholders_without_parameters_stay_literal() {
    let out = render("<!DOCTYPE html><p>${title}</p>", &plain());
    assert!(out.contains("createTextNode('${title}')"));
}

#[test]
fn replace_by_id() {
    let options = FileOptions {
        behavior: Behavior::Replace,
        replacement_id: Some("app".to_owned()),
        ..plain()
    };
    let out = lines("<!DOCTYPE html><main></main>", &options);
    assert_eq!(
        out,
        vec![
            "function page() {",
            "const e0 = document.createElement('main');",
            "e0.setAttribute('id', 'app');",
            "document.getElementById('app').replaceWith(e0);",
            "}",
        ]
    );
}

#[test]
fn replace_by_id_reads_parameters_from_replaced_element() {
    let options = FileOptions {
        behavior: Behavior::Replace,
        replacement_id: Some("app".to_owned()),
        parameters: vec!["title".to_owned()],
        ..plain()
    };
    let out = lines("<!DOCTYPE html><h1>${title}</h1>", &options);
    assert_eq!(
        out,
        vec![
            "function page() {",
            "const replaced = document.getElementById('app');",
            "const title = replaced.getAttribute('title');",
            "const e0 = document.createElement('h1');",
            "e0.appendChild(document.createTextNode(`${title}`));",
            "e0.setAttribute('id', 'app');",
            "replaced.replaceWith(e0);",
            "}",
        ]
    );
}

#[test]
fn replace_loader_script() {
    let options = FileOptions {
        behavior: Behavior::Replace,
        parameters: vec!["title".to_owned()],
        ..plain()
    };
    let out = lines("<!DOCTYPE html><h1>${title}</h1>", &options);
    assert_eq!(
        out[1],
        "const loader = document.querySelector('script[src$=\"page.js\"]');"
    );
    assert_eq!(out[2], "const title = loader.getAttribute('title');");
    assert_eq!(out[out.len() - 2], "loader.replaceWith(e0);");
}

#[test]
fn onload_guard() {
    let options = FileOptions {
        behavior: Behavior::Replace,
        replacement_id: Some("app".to_owned()),
        onload: true,
        ..plain()
    };
    let out = render("<!DOCTYPE html><main></main>", &options);
    assert!(out.ends_with(
        "}\n\
         if (document.readyState === 'interactive' || document.readyState === 'complete') {\n\
         \tpage();\n\
         } else {\n\
         \tdocument.addEventListener('DOMContentLoaded', () => {\n\
         \t\tpage();\n\
         \t});\n\
         }\n"
    ));
}

#[test]
fn exactly_one_base_element() {
    let out = lines(
        "<!DOCTYPE html>\n<section>\n\t<h2>A</h2>\n\t<div><span>B</span></div>\n</section>\n",
        &plain(),
    );
    let creations = out.iter().filter(|l| l.contains("createElement(")).count();
    let appends = out
        .iter()
        .filter(|l| l.ends_with(");") && l.contains(".appendChild(e"))
        .count();
    // every element but the base is appended to a parent
    assert_eq!(creations, appends + 1);
    assert_eq!(out[out.len() - 2], "return e0;");
}
