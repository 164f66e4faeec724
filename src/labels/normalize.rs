// Label normalization for duplicate grouping.
//
// Lesson recordings get exported several times with slightly different
// names: underscores instead of spaces, a "(1)" counter from the browser,
// a "v2" re-record. Normalizing strips all of that so equal lessons compare
// equal as plain strings.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Media and transcript extensions stripped before comparison.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "mp4", "m4a", "flac", "aac", "ogg", "webm", "mov", "txt",
];

static EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?i)\.({})$", MEDIA_EXTENSIONS.join("|"));
    Regex::new(&pattern).expect("extension pattern is valid")
});

// regex-lite's `\s` and `\b` are ASCII-only, so the no-break spaces that
// show up in exported file names (U+00A0, U+2007, U+202F) are listed here.
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[_\\-\\s\u{00A0}\u{2007}\u{202F}]+").expect("separator pattern is valid")
});

// "(2)", "( copy )", "v1", "v1.2", "version 3"
static MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*(\d+|copy)\s*\)|\bv\d+(\.\d+)*\b|\bversion ?\d+(\.\d+)*\b")
        .expect("marker pattern is valid")
});

/// Normalize a label into its grouping key.
///
/// Rules, applied in order: strip a known media extension, collapse runs of
/// `_`, `-`, ASCII whitespace and no-break spaces to one space, strip
/// duplicate and version markers, lowercase, trim. Other Unicode whitespace
/// is left in place. The pass repeats until nothing changes, so
/// `normalize_label(normalize_label(x)) == normalize_label(x)`.
pub fn normalize_label(label: &str) -> String {
    let mut current = normalize_pass(label);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(label: &str) -> String {
    let stripped = EXTENSION.replace(label.trim(), "");
    let collapsed = SEPARATORS.replace_all(&stripped, " ");
    let unmarked = MARKERS.replace_all(&collapsed, " ");
    let lowered = unmarked.to_lowercase();
    SEPARATORS.replace_all(&lowered, " ").trim().to_string()
}

/// The final path component of a label, without any leading `./`.
pub fn display_name(label: &str) -> &str {
    let label = label.trim();
    let label = label.strip_prefix("./").unwrap_or(label);
    label.rsplit(['/', '\\']).next().unwrap_or(label)
}

/// Remove one known media extension from a file name, if present.
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if MEDIA_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => name,
    }
}
