use serde::{Deserialize, Serialize};

/// Reply to a web-grounded query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundedAnswer {
    pub text: Option<String>,
    /// Sources in the order the service listed them. May be empty.
    pub citations: Vec<Citation>,
}

/// Provenance reference attached by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl GroundedAnswer {
    pub fn has_citations(&self) -> bool {
        !self.citations.is_empty()
    }
}

impl Citation {
    /// Best label for display: the title, else the URI.
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.uri.as_deref())
            .unwrap_or("unknown source")
    }
}
