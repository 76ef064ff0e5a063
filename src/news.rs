//! Raw response data: the generated text plus its citation sources.

use crate::sections::{classify, Sections};
use serde::{Deserialize, Serialize};
use url::Url;

/// Title shown for sources the service returned without one
pub const UNTITLED_SOURCE: &str = "Notícia relacionada";

/// A citation record attached to the generated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl GroundingSource {
    pub fn new(title: Option<String>, uri: Option<String>) -> Self {
        Self { title, uri }
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED_SOURCE)
    }

    /// Host part of the URI, if it parses.
    pub fn host(&self) -> Option<String> {
        let uri = self.uri.as_deref()?;
        Url::parse(uri).ok()?.host_str().map(str::to_string)
    }
}

/// One fetch result. Superseded in full by the next fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub summary: String,
    pub sources: Vec<GroundingSource>,
}

impl NewsResponse {
    /// Build a response, dropping sources that carry no URI.
    pub fn new(summary: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        let sources = sources
            .into_iter()
            .filter(|s| s.uri.as_deref().is_some_and(|u| !u.is_empty()))
            .collect();
        Self {
            summary: summary.into(),
            sources,
        }
    }

    pub fn sections(&self) -> Sections {
        classify(&self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_sources_without_uri() {
        let response = NewsResponse::new(
            "texto",
            vec![
                GroundingSource::new(Some("Sem link".into()), None),
                GroundingSource::new(None, Some("".into())),
                GroundingSource::new(None, Some("https://www.gov.br/mec".into())),
            ],
        );
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].display_title(), UNTITLED_SOURCE);
    }

    #[test]
    fn host_of_source() {
        let source = GroundingSource::new(
            Some("MEC".into()),
            Some("https://www.gov.br/mec/pt-br/piso".into()),
        );
        assert_eq!(source.host().as_deref(), Some("www.gov.br"));
        assert_eq!(GroundingSource::new(None, Some("nope".into())).host(), None);
    }
}
