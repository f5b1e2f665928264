use std::sync::OnceLock;

use regex::Regex;

use super::ContentNode;

/// Base URL that bare photo identifiers in `[img]` tags resolve against.
pub const IMAGE_BASE_URL: &str = "https://images.unsplash.com/";

const BOLD: &str = "**";
const UNDERLINE: &str = "__";
const ITALIC: &str = "*";

fn image_tag_regex() -> &'static Regex {
    static IMAGE_TAG: OnceLock<Regex> = OnceLock::new();
    IMAGE_TAG.get_or_init(|| Regex::new(r"\[img\](.+?)\[/img\]").expect("invalid image tag pattern"))
}

fn paragraph_break_regex() -> &'static Regex {
    static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();
    PARAGRAPH_BREAK
        .get_or_init(|| Regex::new(r"\n{2,}").expect("invalid paragraph break pattern"))
}

/// Parses a raw post body into an ordered sequence of [`ContentNode`]s.
///
/// The function is total: any string input produces a tree, never an error.
/// Unpaired or malformed delimiters degrade to literal text instead of being
/// dropped, and the same input always yields a structurally identical tree.
///
/// The body is split into paragraphs on runs of two or more newlines.
/// Empty segments (from leading/trailing blank runs) produce no paragraph;
/// a whitespace-only body is still one paragraph holding that whitespace.
/// Within a paragraph, `[img]` tags are extracted first, then the
/// surrounding text goes through mark parsing with fixed priority
/// bold (`**`) > underline (`__`) > italic (`*`).
pub fn render(body: &str) -> Vec<ContentNode> {
    paragraph_break_regex()
        .split(body)
        .filter(|segment| !segment.is_empty())
        .map(|segment| ContentNode::Paragraph(parse_inline(segment)))
        .collect()
}

/// Image-extraction pass over one paragraph segment.
///
/// Scans left to right for `[img]IDENTIFIER[/img]` (non-greedy identifier).
/// Text between and around the tags goes through [`parse_marks`]; the tags
/// themselves become [`ContentNode::Image`] nodes in source order.
fn parse_inline(text: &str) -> Vec<ContentNode> {
    let mut children = Vec::new();
    let mut pos = 0;
    for caps in image_tag_regex().captures_iter(text) {
        let (Some(tag), Some(identifier)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        children.extend(parse_marks(&text[pos..tag.start()]));
        children.push(ContentNode::Image {
            url: resolve_image_url(identifier.as_str()),
        });
        pos = tag.end();
    }
    children.extend(parse_marks(&text[pos..]));
    children
}

/// Absolute URLs pass through untouched; anything else is treated as a bare
/// photo identifier and prefixed with [`IMAGE_BASE_URL`].
fn resolve_image_url(identifier: &str) -> String {
    if identifier.starts_with("http://") || identifier.starts_with("https://") {
        identifier.to_string()
    } else {
        format!("{IMAGE_BASE_URL}{identifier}")
    }
}

/// Mark-parsing pass: recursive descent over a fragment with no image tags.
///
/// Delimiter rules are tried in fixed priority order. The first matched pair
/// at a level wins; the text before, inside, and after the pair is parsed
/// recursively, so marks may nest. A level with no pair falls through to the
/// next, and a fragment with no pairs at all becomes a single literal text
/// leaf. Recursion depth is bounded by the number of delimiter pairs in the
/// fragment; paragraphs keep fragments short in practice.
fn parse_marks(text: &str) -> Vec<ContentNode> {
    if text.is_empty() {
        return Vec::new();
    }
    for (delim, wrap) in [
        (BOLD, ContentNode::Bold as fn(Vec<ContentNode>) -> ContentNode),
        (UNDERLINE, ContentNode::Underline),
        (ITALIC, ContentNode::Italic),
    ] {
        if let Some((open, close)) = find_pair(text, delim) {
            let before = &text[..open];
            let inner = &text[open + delim.len()..close];
            let after = &text[close + delim.len()..];

            let mut nodes = parse_marks(before);
            nodes.push(wrap(parse_marks(inner)));
            nodes.extend(parse_marks(after));
            return nodes;
        }
    }
    vec![ContentNode::Text(text.to_string())]
}

/// Finds the first matched, non-overlapping delimiter pair in `text`.
///
/// Returns the byte offsets of the opening and closing delimiter. All
/// occurrences are candidates, including overlapping ones in runs like
/// `***`: the closing is the earliest occurrence with a non-overlapping
/// occurrence before it, paired with the nearest such opening. That makes
/// `***x***` match bold around `x` and leaves one literal `*` on each side.
/// Empty spans do not count, so a run like `****` stays literal.
fn find_pair(text: &str, delim: &str) -> Option<(usize, usize)> {
    let len = delim.len();
    let mut occurrences = Vec::new();
    let mut from = 0;
    while let Some(offset) = text[from..].find(delim) {
        let at = from + offset;
        occurrences.push(at);
        // Step by one byte so overlapping occurrences in runs are seen.
        from = at + 1;
    }

    for (i, &close) in occurrences.iter().enumerate() {
        if let Some(&open) = occurrences[..i].iter().rev().find(|&&o| o + len <= close)
            && close > open + len
        {
            return Some((open, close));
        }
    }
    None
}
