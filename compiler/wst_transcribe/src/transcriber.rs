//! Node stream to DOM-building statements.
//!
//! The transcriber walks [`Node`]s with one open-element stack of
//! `(identifier, tag)` pairs. Every opening tag allocates the next
//! identifier (`e0`, `e1`, ...), creates the element, sets its attributes
//! and appends it to the element on top of the stack. The first element
//! created with an empty stack is the base element; the generated function
//! returns it or puts it in place of an existing page element.
//!
//! # Stack discipline
//!
//! - Void elements are never pushed, and their closing tags are ignored.
//! - Inside `<svg>` every element uses the SVG namespace, not only `svg`
//!   and `path`, so children such as `circle` become real SVG nodes.
//!   Elements written with `/>` (and `path`) are not pushed, and a closing
//!   tag only pops when it matches the top. `</svg>` unwinds up to and
//!   including the nearest `<svg>`.
//! - Elsewhere a closing tag must match the top of the stack, unless
//!   lenient closing tags are enabled, in which case a mismatch is skipped.

use std::borrow::Cow;

use wst_emit::Code;
use wst_lexer::{AttributeValue, TagToken, RAW_TEXT_ELEMENTS};

use crate::config::{Behavior, FileOptions};
use crate::entity::contains_entity;
use crate::error::{StructuralError, TranscribeError};
use crate::js::{has_placeholder, string_literal, template_literal};
use crate::stream::Node;
use crate::vocab::{event_name, is_self_closing, SVG_NAMESPACE};
use crate::OutputNames;

/// Handle of the element a replace-by-id function swaps out.
const REPLACED: &str = "replaced";

/// Handle of the `<script>` element that loaded the output file.
const LOADER: &str = "loader";

/// Join the lines of a multi-line attribute value with single spaces,
/// dropping the indentation of continuation lines.
fn join_lines(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r']) {
        return Cow::Borrowed(text);
    }
    let mut pieces = text.split('\n').map(|piece| piece.trim_end_matches('\r'));
    let mut joined = pieces.next().unwrap_or_default().to_owned();
    for piece in pieces.map(|p| p.trim_start_matches([' ', '\t'])) {
        if !piece.is_empty() {
            joined.push(' ');
            joined.push_str(piece);
        }
    }
    Cow::Owned(joined)
}

/// An element on the open-element stack.
#[derive(Clone, Debug, PartialEq, Eq)]
struct OpenElement {
    ident: String,
    tag: String,
}

/// Transcribes one file's nodes into a [`Code`] buffer.
///
/// Identifier numbering and the decode-helper flag belong to one value;
/// create a new transcriber per file.
pub struct Transcriber<'a> {
    names: &'a OutputNames,
    options: &'a FileOptions,
    body: Code,
    stack: Vec<OpenElement>,
    base: Option<OpenElement>,
    next_id: usize,
    needs_decoder: bool,
}

impl<'a> Transcriber<'a> {
    pub fn new(names: &'a OutputNames, options: &'a FileOptions) -> Self {
        Self {
            names,
            options,
            body: Code::new(),
            stack: Vec::new(),
            base: None,
            next_id: 0,
            needs_decoder: false,
        }
    }

    /// Transcribe `nodes` (DOCTYPE already removed) into the output script.
    pub fn transcribe(mut self, nodes: &[Node]) -> Result<Code, TranscribeError> {
        for node in nodes {
            match node {
                Node::Element {
                    tokens,
                    self_closed,
                    line,
                } => self.open_element(tokens, *self_closed, *line)?,
                Node::Text { text, line } => self.text(text, *line)?,
                Node::Close { tag, line } => self.close_element(tag, *line)?,
            }
        }

        if !self.stack.is_empty() {
            let open: Vec<&str> = self.stack.iter().map(|e| e.tag.as_str()).collect();
            tracing::debug!(?open, "elements left open at end of input");
        }

        let base = self
            .base
            .take()
            .ok_or(StructuralError::MissingBaseElement)?;
        Ok(self.assemble(&base))
    }

    // ─── Elements ──────────────────────────────────────────────────

    fn open_element(
        &mut self,
        tokens: &[TagToken],
        self_closed: bool,
        line: u32,
    ) -> Result<(), TranscribeError> {
        let Some(TagToken::TagName(name)) = tokens.first() else {
            return Err(StructuralError::MissingTagName { line }.into());
        };
        let tag = name.to_ascii_lowercase();
        let ident = format!("e{}", self.next_id);
        self.next_id += 1;

        let inside_svg = self.inside_svg();
        if inside_svg || tag == "svg" {
            self.body.push_line(format!(
                "const {ident} = document.createElementNS({}, {});",
                string_literal(SVG_NAMESPACE),
                string_literal(&tag)
            ));
        } else {
            self.body.push_line(format!(
                "const {ident} = document.createElement({});",
                string_literal(&tag)
            ));
        }

        // Only the first token names the element.
        for token in &tokens[1..] {
            match token {
                TagToken::TagName(_) => {}
                TagToken::AttributeName(attribute) => self.body.push_line(format!(
                    "{ident}.setAttribute({}, true);",
                    string_literal(attribute)
                )),
                TagToken::Attribute { name, value } => self.attribute(&ident, name, value),
            }
        }

        if let Some(parent) = self.stack.last() {
            self.body
                .push_line(format!("{}.appendChild({ident});", parent.ident));
        } else if let Some(first) = &self.base {
            return Err(StructuralError::DuplicateBaseElement {
                first: first.tag.clone(),
                second: tag,
            }
            .into());
        } else if is_self_closing(&tag) {
            return Err(StructuralError::VoidBaseElement { tag }.into());
        } else {
            self.base = Some(OpenElement {
                ident: ident.clone(),
                tag: tag.clone(),
            });
        }

        let leaf = is_self_closing(&tag) || (inside_svg && (self_closed || tag == "path"));
        if !leaf {
            self.stack.push(OpenElement { ident, tag });
        }
        Ok(())
    }

    fn attribute(&mut self, ident: &str, name: &str, value: &AttributeValue) {
        if let Some(event) = event_name(name) {
            self.body.push_line(format!(
                "{ident}.addEventListener({}, (event) => {{",
                string_literal(event)
            ));
            self.body.push_verbatim(value.text());
            self.body.push_line("});");
            return;
        }

        let value = match value {
            AttributeValue::Expression(expr) => expr.trim().to_owned(),
            AttributeValue::Quoted { text, .. } | AttributeValue::Bare(text) => {
                self.literal(&join_lines(text))
            }
        };
        self.body.push_line(format!(
            "{ident}.setAttribute({}, {value});",
            string_literal(name)
        ));
    }

    fn close_element(&mut self, tag: &str, line: u32) -> Result<(), TranscribeError> {
        if tag == "svg" {
            if let Some(index) = self.stack.iter().rposition(|e| e.tag == "svg") {
                self.stack.truncate(index);
                return Ok(());
            }
        }

        if self.inside_svg() {
            if self.stack.last().is_some_and(|top| top.tag == tag) {
                self.stack.pop();
            } else {
                tracing::debug!(tag, line, "closing tag inside svg ignored");
            }
            return Ok(());
        }

        if is_self_closing(tag) {
            tracing::debug!(tag, line, "closing tag of void element ignored");
            return Ok(());
        }

        let Some(top) = self.stack.last() else {
            return Err(StructuralError::StackUnderflow {
                tag: tag.to_owned(),
                line,
            }
            .into());
        };
        if top.tag != tag {
            if self.options.lenient_closing_tags {
                tracing::debug!(
                    expected = %top.tag,
                    found = tag,
                    line,
                    "mismatched closing tag skipped"
                );
                return Ok(());
            }
            return Err(TranscribeError::TagMismatch {
                expected: top.tag.clone(),
                found: tag.to_owned(),
                line,
            });
        }
        self.stack.pop();
        Ok(())
    }

    fn inside_svg(&self) -> bool {
        self.stack.iter().any(|e| e.tag == "svg")
    }

    // ─── Text ──────────────────────────────────────────────────────

    fn text(&mut self, text: &str, line: u32) -> Result<(), TranscribeError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let Some(parent) = self.stack.last() else {
            return Err(StructuralError::TextOutsideElement { line }.into());
        };

        let raw_text = RAW_TEXT_ELEMENTS.contains(&parent.tag.as_str());
        let mut value = self.literal(text);
        if self.options.decode_entities && !raw_text && contains_entity(text) {
            self.needs_decoder = true;
            value = format!("dec({value})");
        }
        let statement = format!(
            "{}.appendChild(document.createTextNode({value}));",
            parent.ident
        );
        self.body.push_line(statement);
        Ok(())
    }

    /// A string literal, or a template literal when parameters can fill
    /// `${...}` placeholders.
    fn literal(&self, text: &str) -> String {
        if !self.options.parameters.is_empty() && has_placeholder(text) {
            template_literal(text)
        } else {
            string_literal(text)
        }
    }

    // ─── Output ────────────────────────────────────────────────────

    /// Wrap the body in the function and append the trailing pieces.
    fn assemble(&self, base: &OpenElement) -> Code {
        let function = &self.names.function;
        let params = &self.options.parameters;
        let mut code = Code::new().minified(self.options.minify);

        let arguments = match self.options.behavior {
            Behavior::Return => params.join(", "),
            Behavior::Replace => String::new(),
        };
        code.push_line(format!("function {function}({arguments}) {{"));
        self.prologue(&mut code);
        code.push_all(&self.body);
        self.epilogue(&mut code, &base.ident);
        code.push_line("}");

        if self.needs_decoder {
            code.push_line("function dec(data) {");
            code.push_line("const e = document.createElement('textarea');");
            code.push_line("e.innerHTML = data;");
            code.push_line("return e.value;");
            code.push_line("}");
        }

        if self.options.onload {
            let call = format!("{function}();");
            code.push_line(
                "if (document.readyState === 'interactive' || document.readyState === 'complete') {",
            );
            code.push_line(&call);
            code.push_line("} else {");
            code.push_line("document.addEventListener('DOMContentLoaded', () => {");
            code.push_line(&call);
            code.push_line("});");
            code.push_line("}");
        }
        code
    }

    /// Bind the element handles and parameters a replace function reads.
    fn prologue(&self, code: &mut Code) {
        if self.options.behavior != Behavior::Replace {
            return;
        }
        let params = &self.options.parameters;
        let source = match &self.options.replacement_id {
            Some(_) if params.is_empty() => return,
            Some(id) => {
                code.push_line(format!(
                    "const {REPLACED} = document.getElementById({});",
                    string_literal(id)
                ));
                REPLACED
            }
            None => {
                let selector = format!("script[src$=\"{}\"]", self.names.script);
                code.push_line(format!(
                    "const {LOADER} = document.querySelector({});",
                    string_literal(&selector)
                ));
                LOADER
            }
        };
        for param in params {
            code.push_line(format!(
                "const {param} = {source}.getAttribute({});",
                string_literal(param)
            ));
        }
    }

    fn epilogue(&self, code: &mut Code, base: &str) {
        match (self.options.behavior, &self.options.replacement_id) {
            (Behavior::Return, _) => code.push_line(format!("return {base};")),
            (Behavior::Replace, Some(id)) => {
                let id = string_literal(id);
                code.push_line(format!("{base}.setAttribute('id', {id});"));
                if self.options.parameters.is_empty() {
                    code.push_line(format!(
                        "document.getElementById({id}).replaceWith({base});"
                    ));
                } else {
                    code.push_line(format!("{REPLACED}.replaceWith({base});"));
                }
            }
            (Behavior::Replace, None) => code.push_line(format!("{LOADER}.replaceWith({base});")),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
