use crate::extract::strip_wrapping;

/// Used when extraction produced nothing usable; a commit is never attempted
/// with an empty message.
pub const FALLBACK_MESSAGE: &str = "chore: update (generation failed)";

/// A commit message as a list of segments, one per `git commit -m` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    segments: Vec<String>,
}

impl CommitMessage {
    /// Build the final message from extracted text plus optional ticket refs.
    ///
    /// Each extracted line is one segment; the surrounding quotes of a
    /// standalone `-m "..."` argument are removed. Ticket references get a
    /// `#` prefix when missing and land in one trailing `Tickets:` segment.
    pub fn assemble(extracted: &str, ticket_refs: &[String]) -> Self {
        let mut segments: Vec<String> = extracted
            .lines()
            .map(normalize_segment)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            segments.push(FALLBACK_MESSAGE.to_string());
        }

        if !ticket_refs.is_empty() {
            let formatted: Vec<String> = ticket_refs
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(|t| {
                    if t.starts_with('#') {
                        t.to_string()
                    } else {
                        format!("#{t}")
                    }
                })
                .collect();
            if !formatted.is_empty() {
                segments.push(format!("Tickets: {}", formatted.join(" ")));
            }
        }

        CommitMessage { segments }
    }

    /// Rebuild a message from edited plain text; one line per segment.
    /// Returns `None` when nothing remains after trimming.
    pub fn from_text(text: &str) -> Option<Self> {
        let segments: Vec<String> = text
            .lines()
            .map(normalize_segment)
            .filter(|s| !s.is_empty())
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(CommitMessage { segments })
        }
    }

    /// The editable plain-text form shown in the interactive loop.
    pub fn to_text(&self) -> String {
        self.segments.join("\n")
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

fn normalize_segment(line: &str) -> String {
    let mut seg = line.trim();
    if let Some(inner) = strip_wrapping(seg, '"') {
        seg = inner;
    } else if let Some(inner) = strip_wrapping(seg, '\'') {
        seg = inner;
    }
    seg.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_extraction_falls_back() {
        let msg = CommitMessage::assemble("", &[]);
        assert_eq!(msg.segments(), [FALLBACK_MESSAGE]);
    }

    #[test]
    fn ticket_refs_are_normalized_and_appended() {
        let msg = CommitMessage::assemble("fix: x", &refs(&["JIRA-1", "#GH-2"]));
        assert_eq!(
            msg.segments(),
            ["fix: x".to_string(), "Tickets: #JIRA-1 #GH-2".to_string()]
        );
    }

    #[test]
    fn tickets_attach_even_to_the_fallback() {
        let msg = CommitMessage::assemble("", &refs(&["GH-7"]));
        assert_eq!(
            msg.segments(),
            [FALLBACK_MESSAGE.to_string(), "Tickets: #GH-7".to_string()]
        );
    }

    #[test]
    fn quoted_segments_are_unwrapped() {
        let msg = CommitMessage::assemble("\"feat: add parser\"\n\"- covers edge cases\"", &[]);
        assert_eq!(
            msg.segments(),
            ["feat: add parser".to_string(), "- covers edge cases".to_string()]
        );
    }

    #[test]
    fn blank_lines_do_not_become_segments() {
        let msg = CommitMessage::assemble("feat: a\n\n   \nfix: b", &[]);
        assert_eq!(msg.segments(), ["feat: a".to_string(), "fix: b".to_string()]);
    }

    #[test]
    fn text_round_trip() {
        let msg = CommitMessage::assemble("feat: a\nfix: b", &[]);
        let text = msg.to_text();
        assert_eq!(CommitMessage::from_text(&text), Some(msg));
    }

    #[test]
    fn from_text_rejects_empty_input() {
        assert_eq!(CommitMessage::from_text("   \n \n"), None);
    }
}
