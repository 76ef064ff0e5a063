//! The closed set of news categories and their bracket markers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// One of the six buckets content lines are sorted into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Piso,
    Concursos,
    Beneficios,
    Regras,
    Sindicato,
    /// Catch-all for lines seen before any marker
    Geral,
}

impl Category {
    /// All categories, in marker-matching order with the default last.
    pub const ALL: [Category; 6] = [
        Category::Piso,
        Category::Concursos,
        Category::Beneficios,
        Category::Regras,
        Category::Sindicato,
        Category::Geral,
    ];

    /// Tabs shown in the dashboard, in display order.
    pub const TABS: [Category; 5] = [
        Category::Piso,
        Category::Concursos,
        Category::Sindicato,
        Category::Beneficios,
        Category::Regras,
    ];

    /// The exact bracket tag that switches the classifier to this category.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Category::Piso => Some("[PISO]"),
            Category::Concursos => Some("[CONCURSOS]"),
            Category::Beneficios => Some("[BENEFICIOS]"),
            Category::Regras => Some("[REGRAS]"),
            Category::Sindicato => Some("[SINDICATO]"),
            Category::Geral => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Category::Piso => "PISO",
            Category::Concursos => "CONCURSOS",
            Category::Beneficios => "BENEFICIOS",
            Category::Regras => "REGRAS",
            Category::Sindicato => "SINDICATO",
            Category::Geral => "GERAL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Piso => "Piso Salarial",
            Category::Concursos => "Concursos",
            Category::Beneficios => "Benefícios",
            Category::Regras => "Regras",
            Category::Sindicato => "Sindicatos",
            Category::Geral => "Geral",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Piso => "💰",
            Category::Concursos => "📝",
            Category::Beneficios => "🌟",
            Category::Regras => "⚖️",
            Category::Sindicato => "✊",
            Category::Geral => "📰",
        }
    }

    /// Position in [`Category::ALL`], used to index bucket storage.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Find the first category whose marker occurs anywhere in `line`.
    pub fn from_marker_line(line: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|cat| cat.marker().is_some_and(|m| line.contains(m)))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('[').trim_end_matches(']');
        Category::ALL
            .into_iter()
            .find(|cat| cat.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (i, cat) in Category::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
        }
    }

    #[test]
    fn only_general_has_no_marker() {
        let without: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.marker().is_none())
            .collect();
        assert_eq!(without, vec![Category::Geral]);
    }

    #[test]
    fn marker_match_is_substring_and_case_sensitive() {
        assert_eq!(
            Category::from_marker_line("## [REGRAS] novidades"),
            Some(Category::Regras)
        );
        assert_eq!(Category::from_marker_line("[regras]"), None);
        assert_eq!(Category::from_marker_line("[OUTRO]"), None);
    }

    #[test]
    fn first_marker_in_order_wins() {
        assert_eq!(
            Category::from_marker_line("[SINDICATO] e [PISO]"),
            Some(Category::Piso)
        );
    }

    #[test]
    fn parses_tags_loosely() {
        assert_eq!("piso".parse::<Category>(), Ok(Category::Piso));
        assert_eq!("[SINDICATO]".parse::<Category>(), Ok(Category::Sindicato));
        assert!("nada".parse::<Category>().is_err());
    }

    #[test]
    fn tabs_exclude_general() {
        assert!(!Category::TABS.contains(&Category::Geral));
    }
}
