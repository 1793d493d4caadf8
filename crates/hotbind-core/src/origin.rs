// Hotbind Input Layer - Origin Filtering
// Keeps shortcuts from firing while the user is typing into a text control

/// Tag names whose key events belong to text entry
const TEXT_ENTRY_TAGS: &[&str] = &["INPUT", "TEXTAREA", "SELECT"];

/// The element a keyboard event originated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    tag_name: String,
    content_editable: bool,
}

impl Origin {
    /// Describe an origin element by its tag name
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            content_editable: false,
        }
    }

    /// Mark the origin as content-editable
    pub fn content_editable(mut self, editable: bool) -> Self {
        self.content_editable = editable;
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn is_content_editable(&self) -> bool {
        self.content_editable
    }

    /// Check whether key events from this element must never reach shortcuts.
    ///
    /// True for content-editable elements and for INPUT, TEXTAREA and SELECT
    /// tags in any letter case.
    pub fn is_text_entry(&self) -> bool {
        self.content_editable
            || TEXT_ENTRY_TAGS
                .iter()
                .any(|tag| self.tag_name.eq_ignore_ascii_case(tag))
    }
}

/// Check if an event with this origin should be discarded before key lookup.
///
/// Events with no origin element are eligible.
pub fn is_excluded_origin(origin: Option<&Origin>) -> bool {
    origin.is_some_and(Origin::is_text_entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_controls_are_excluded() {
        for tag in ["INPUT", "TEXTAREA", "SELECT"] {
            assert!(Origin::new(tag).is_text_entry(), "{} should be excluded", tag);
        }
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        assert!(Origin::new("input").is_text_entry());
        assert!(Origin::new("TextArea").is_text_entry());
        assert!(Origin::new("select").is_text_entry());
    }

    #[test]
    fn test_plain_elements_are_eligible() {
        assert!(!Origin::new("DIV").is_text_entry());
        assert!(!Origin::new("BUTTON").is_text_entry());
        assert!(!Origin::new("INPUTS").is_text_entry());
        assert!(!Origin::new("").is_text_entry());
    }

    #[test]
    fn test_content_editable_is_excluded() {
        let div = Origin::new("DIV").content_editable(true);
        assert!(div.is_text_entry());
        assert!(div.is_content_editable());
    }

    #[test]
    fn test_missing_origin_is_eligible() {
        assert!(!is_excluded_origin(None));
        assert!(is_excluded_origin(Some(&Origin::new("input"))));
    }
}
