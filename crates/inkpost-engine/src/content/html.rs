use super::ContentNode;

/// Renders content nodes to an HTML string.
///
/// Text leaves are entity-escaped and image URLs are attribute-escaped, so
/// markup in a post body can never reach the page as live HTML. This is the
/// only supported display path for post bodies.
pub fn to_html(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &ContentNode) {
    match node {
        ContentNode::Paragraph(children) => write_wrapped(out, "p", children),
        ContentNode::Bold(children) => write_wrapped(out, "strong", children),
        ContentNode::Underline(children) => write_wrapped(out, "u", children),
        ContentNode::Italic(children) => write_wrapped(out, "em", children),
        ContentNode::Image { url } => {
            out.push_str("<img src=\"");
            html_escape::encode_double_quoted_attribute_to_string(url, out);
            out.push_str("\" alt=\"\" loading=\"lazy\">");
        }
        ContentNode::Text(text) => {
            html_escape::encode_text_to_string(text, out);
        }
    }
}

fn write_wrapped(out: &mut String, tag: &str, children: &[ContentNode]) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for child in children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
