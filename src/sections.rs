//! Section classifier: partitions a response text into per-category lines.
//!
//! A line switches the current category when it contains one of the bracket
//! markers (see [`Category::marker`]); the marker line itself is dropped.
//! Every other non-blank line that neither starts with `[` nor ends with `]`
//! is stored, untrimmed, in the bucket of the current category. Lines before
//! the first marker go to [`Category::Geral`].

use crate::category::Category;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Categorised content: six ordered buckets, one per [`Category`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    buckets: [Vec<String>; 6],
}

impl Sections {
    /// Lines assigned to `category`, in source order.
    pub fn get(&self, category: Category) -> &[String] {
        &self.buckets[category.index()]
    }

    /// Iterate over all six buckets in [`Category::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .into_iter()
            .map(move |cat| (cat, self.get(cat)))
    }

    pub fn total_lines(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_lines() == 0
    }

    fn push(&mut self, category: Category, line: &str) {
        self.buckets[category.index()].push(line.to_string());
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (cat, lines) in self.iter() {
            map.serialize_entry(cat.tag(), lines)?;
        }
        map.end()
    }
}

/// Classify `text` into the six category buckets. Never fails.
pub fn classify(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current = Category::Geral;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if let Some(category) = Category::from_marker_line(trimmed) {
            current = category;
            continue;
        }

        if !trimmed.is_empty() && !trimmed.starts_with('[') && !trimmed.ends_with(']') {
            sections.push(current, line);
        }
    }

    tracing::debug!(lines = sections.total_lines(), "classified response text");
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_original_untrimmed_line() {
        let sections = classify("[PISO]\n   - **R$ 4.867** para 2025  ");
        assert_eq!(
            sections.get(Category::Piso),
            ["   - **R$ 4.867** para 2025  "]
        );
    }

    #[test]
    fn marker_mid_line_switches_and_is_dropped() {
        let sections = classify("Intro\n### Seção [CONCURSOS] do dia\nEdital SEEDUC");
        assert_eq!(sections.get(Category::Geral), ["Intro"]);
        assert_eq!(sections.get(Category::Concursos), ["Edital SEEDUC"]);
        assert_eq!(sections.total_lines(), 2);
    }

    #[test]
    fn bracket_edged_lines_are_dropped() {
        let sections = classify("[REGRAS]\n[nota] inicial\nfinal [nota]\nNova BNCC");
        assert_eq!(sections.get(Category::Regras), ["Nova BNCC"]);
    }

    #[test]
    fn carriage_returns_are_trimmed_for_inspection_only() {
        let sections = classify("[SINDICATO]\r\nAssembleia do SEPE\r\n\r\n");
        assert_eq!(sections.get(Category::Sindicato), ["Assembleia do SEPE\r"]);
    }

    #[test]
    fn serializes_every_bucket() {
        let json = serde_json::to_value(classify("[PISO]\nReajuste")).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert_eq!(obj["PISO"], serde_json::json!(["Reajuste"]));
        assert_eq!(obj["GERAL"], serde_json::json!([]));
    }
}
