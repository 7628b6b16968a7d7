//! Fixed vocabularies: void elements, DOM event names, reserved words.
//!
//! Every table is sorted so lookups can binary search.

/// Namespace used for `<svg>` and everything nested in it.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Void elements. They are never pushed on the open-element stack and take
/// no closing tag.
pub const SELF_CLOSING_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// DOM event names recognised in `on<event>` attributes.
pub const EVENT_NAMES: &[&str] = &[
    "abort",
    "afterprint",
    "animationend",
    "animationiteration",
    "animationstart",
    "auxclick",
    "beforeinput",
    "beforeprint",
    "beforeunload",
    "blur",
    "canplay",
    "canplaythrough",
    "change",
    "click",
    "close",
    "contextmenu",
    "copy",
    "cuechange",
    "cut",
    "dblclick",
    "drag",
    "dragend",
    "dragenter",
    "dragleave",
    "dragover",
    "dragstart",
    "drop",
    "durationchange",
    "emptied",
    "ended",
    "error",
    "focus",
    "focusin",
    "focusout",
    "formdata",
    "fullscreenchange",
    "fullscreenerror",
    "gotpointercapture",
    "hashchange",
    "input",
    "invalid",
    "keydown",
    "keypress",
    "keyup",
    "load",
    "loadeddata",
    "loadedmetadata",
    "loadstart",
    "lostpointercapture",
    "message",
    "mousedown",
    "mouseenter",
    "mouseleave",
    "mousemove",
    "mouseout",
    "mouseover",
    "mouseup",
    "offline",
    "online",
    "pagehide",
    "pageshow",
    "paste",
    "pause",
    "play",
    "playing",
    "pointercancel",
    "pointerdown",
    "pointerenter",
    "pointerleave",
    "pointermove",
    "pointerout",
    "pointerover",
    "pointerup",
    "popstate",
    "progress",
    "ratechange",
    "reset",
    "resize",
    "scroll",
    "search",
    "seeked",
    "seeking",
    "select",
    "selectionchange",
    "show",
    "stalled",
    "storage",
    "submit",
    "suspend",
    "timeupdate",
    "toggle",
    "touchcancel",
    "touchend",
    "touchmove",
    "touchstart",
    "transitionend",
    "unload",
    "volumechange",
    "waiting",
    "wheel",
];

/// JavaScript reserved words, which cannot name functions or parameters.
pub const JS_RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Returns `true` for a void element name (lower-case).
pub fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.binary_search(&tag).is_ok()
}

/// The DOM event an attribute name binds, if it is `on<event>`.
///
/// Matching is ASCII case-insensitive: `onClick` binds `click`.
pub fn event_name(attribute: &str) -> Option<&'static str> {
    let lower = attribute.to_ascii_lowercase();
    let event = lower.strip_prefix("on")?;
    EVENT_NAMES
        .binary_search(&event)
        .ok()
        .map(|index| EVENT_NAMES[index])
}

pub fn is_reserved_word(word: &str) -> bool {
    JS_RESERVED_WORDS.binary_search(&word).is_ok()
}
