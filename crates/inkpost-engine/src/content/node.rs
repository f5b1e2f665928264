/// One node of a parsed post body.
///
/// Marks (bold, underline, italic) wrap child nodes and may nest. Display
/// backends should match exhaustively so a new node kind cannot be silently
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// One blank-line-delimited block of the source body.
    Paragraph(Vec<ContentNode>),
    Bold(Vec<ContentNode>),
    Underline(Vec<ContentNode>),
    Italic(Vec<ContentNode>),
    /// An embedded image with its resolved source URL. No children.
    Image { url: String },
    /// A literal run of text. Never contains a consumed formatting
    /// delimiter; unpaired delimiters stay in here as ordinary characters.
    Text(String),
}

impl ContentNode {
    /// Child nodes of this node. Leaves return an empty slice.
    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Paragraph(children)
            | ContentNode::Bold(children)
            | ContentNode::Underline(children)
            | ContentNode::Italic(children) => children,
            ContentNode::Image { .. } | ContentNode::Text(_) => &[],
        }
    }
}

/// Flattens nodes back to plain text: mark wrappers dissolve, images
/// contribute nothing, and paragraphs are separated by a blank line.
pub fn plain_text(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        if matches!(node, ContentNode::Paragraph(_)) && !out.is_empty() {
            out.push_str("\n\n");
        }
        collect_text(node, &mut out);
    }
    out
}

fn collect_text(node: &ContentNode, out: &mut String) {
    match node {
        ContentNode::Text(text) => out.push_str(text),
        ContentNode::Image { .. } => {}
        ContentNode::Paragraph(children)
        | ContentNode::Bold(children)
        | ContentNode::Underline(children)
        | ContentNode::Italic(children) => {
            for child in children {
                collect_text(child, out);
            }
        }
    }
}
