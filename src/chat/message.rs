//! Chat message content, already extracted from the platform's message format.

/// One piece of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// @-mention of another member.
    Mention { name: String },
    Image { url: Option<String> },
    /// Platform emoji/sticker.
    Face,
    /// Quote of an earlier message.
    Reply,
    /// Anything else, labelled by the adapter (e.g. "file", "video").
    Other(String),
}

impl Segment {
    /// The text a reader sees for this segment.
    pub fn display_text(&self) -> String {
        match self {
            Segment::Text(text) => text.clone(),
            Segment::Mention { name } => format!("@{} ", name),
            Segment::Image { .. } => "[image]".to_string(),
            Segment::Face => "[face]".to_string(),
            Segment::Reply => "[reply]".to_string(),
            Segment::Other(label) => format!("[{}]", label),
        }
    }
}

/// A chat message as an ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatMessage {
    pub segments: Vec<Segment>,
}

impl ChatMessage {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// A message made of one text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Text(text.into())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        let mention = Segment::Mention {
            name: "Alex".to_string(),
        };

        // Mentions keep a trailing space so following text does not stick to the name.
        assert_eq!(mention.display_text(), "@Alex ");
        assert_eq!(Segment::Text("look".to_string()).display_text(), "look");
        assert_eq!(Segment::Image { url: None }.display_text(), "[image]");
        assert_eq!(Segment::Other("file".to_string()).display_text(), "[file]");
    }
}
