// src/table.rs

//! Region Table Codec.
//!
//! The region table is a comma-separated block embedded in a JavaScript
//! source file as a template literal:
//!
//! ```text
//! const RAW = `
//! // Field order: id,name,type,parent,flag,...
//! us,United States,country,,us,335.0,27360,...
//! `.trim();
//! ```
//!
//! Parsing and serialization are pure transforms over in-memory text; all
//! file I/O belongs to the caller. Serialization preserves row order and
//! emits passthrough lines (comments, blanks) byte-for-byte, so an
//! unmodified parse serializes back to the identical document.

use crate::error::{BadRow, PipelineError, Result};
use crate::schema;

pub const START_MARKER: &str = "const RAW = `";
pub const END_MARKER: &str = "`.trim();";

/// One region row: exactly `schema::ARITY` positional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    fields: Vec<String>,
}

impl Region {
    pub fn id(&self) -> &str {
        self.fields[schema::IDX_ID].trim()
    }

    pub fn name(&self) -> &str {
        self.fields[schema::IDX_NAME].trim()
    }

    /// Region kind: `"country"` or a subnational unit tag.
    pub fn kind(&self) -> &str {
        self.fields[schema::IDX_TYPE].trim()
    }

    pub fn is_country(&self) -> bool {
        self.kind() == schema::KIND_COUNTRY
    }

    /// Weak reference to the parent region, by id.
    pub fn parent(&self) -> Option<&str> {
        let p = self.fields[schema::IDX_PARENT].trim();
        if p.is_empty() { None } else { Some(p) }
    }

    pub fn field(&self, idx: usize) -> &str {
        self.fields[idx].trim()
    }

    pub fn set_field(&mut self, idx: usize, value: String) {
        self.fields[idx] = value;
    }

    fn to_line(&self) -> String {
        self.fields.join(",")
    }
}

/// Body line of the table block, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Blank or `//` comment, emitted verbatim.
    Passthrough(String),
    Row(Region),
}

/// A parsed document: the text around the table block plus its body lines.
#[derive(Debug, Clone)]
pub struct TableDocument {
    head: String, // up to and including the opening marker + its newline
    tail: String, // from the line holding the end marker onward
    lines: Vec<Line>,
}

impl TableDocument {
    /// Locate the table block and parse its rows.
    ///
    /// Fatal on missing markers and on any row whose field count differs
    /// from the schema arity — such rows are corrupt and are reported, not
    /// guessed at.
    pub fn parse(text: &str, origin: &std::path::Path) -> Result<TableDocument> {
        let start = text
            .find(START_MARKER)
            .map(|i| i + START_MARKER.len())
            .ok_or_else(|| PipelineError::TableMarkers { path: origin.to_path_buf() })?;
        let end = text[start..]
            .find(END_MARKER)
            .map(|i| start + i)
            .ok_or_else(|| PipelineError::TableMarkers { path: origin.to_path_buf() })?;

        // Keep the newline right after the opening backtick in the head so
        // the body is a clean sequence of whole lines.
        let body_start = match text[start..end].find('\n') {
            Some(i) => start + i + 1,
            None => start,
        };

        let head = text[..body_start].to_string();
        let tail = text[end..].to_string();
        let body = &text[body_start..end];

        let mut lines = Vec::new();
        let mut bad: Vec<BadRow> = Vec::new();

        for (n, raw) in body.split_inclusive('\n').enumerate() {
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                lines.push(Line::Passthrough(line.to_string()));
                continue;
            }
            let fields: Vec<String> = line.split(',').map(str::to_string).collect();
            if fields.len() != schema::ARITY {
                bad.push(BadRow {
                    line: n + 1,
                    found: fields.len(),
                    preview: preview(trimmed),
                });
                continue;
            }
            lines.push(Line::Row(Region { fields }));
        }

        if !bad.is_empty() {
            return Err(PipelineError::RowArity { expected: schema::ARITY, rows: bad });
        }

        Ok(TableDocument { head, tail, lines })
    }

    /// Re-emit the whole document. Rows the merge never touched come back
    /// byte-identical.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.head.len() + self.tail.len() + self.lines.len() * 64);
        out.push_str(&self.head);
        for line in &self.lines {
            match line {
                Line::Passthrough(s) => out.push_str(s),
                Line::Row(r) => out.push_str(&r.to_line()),
            }
            out.push('\n');
        }
        out.push_str(&self.tail);
        out
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.lines.iter().filter_map(|l| match l {
            Line::Row(r) => Some(r),
            _ => None,
        })
    }

    pub fn regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.lines.iter_mut().filter_map(|l| match l {
            Line::Row(r) => Some(r),
            _ => None,
        })
    }

    pub fn region_count(&self) -> usize {
        self.regions().count()
    }

    pub fn country_count(&self) -> usize {
        self.regions().filter(|r| r.is_country()).count()
    }

    /// Rewrite the `// Sources:` provenance comment with the target year.
    /// Checks the body first, then the surrounding document text.
    pub fn set_sources_note(&mut self, target_year: i32) {
        let note = format!(
            "// Sources: World Bank API (country data unified to {}), national statistics bureaus",
            target_year
        );
        for line in self.lines.iter_mut() {
            if let Line::Passthrough(s) = line {
                if s.trim_start().starts_with("// Sources:") {
                    // Keep the line's leading whitespace intact.
                    let indent = s.len() - s.trim_start().len();
                    s.replace_range(indent.., &note);
                    return;
                }
            }
        }
        for text in [&mut self.head, &mut self.tail] {
            if let Some(pos) = text.find("// Sources:") {
                let end = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
                text.replace_range(pos..end, &note);
                return;
            }
        }
    }
}

fn preview(line: &str) -> String {
    const MAX: usize = 40;
    let mut p: String = line.chars().take(MAX).collect();
    if line.chars().count() > MAX {
        p.push('…');
    }
    p
}

/* ---------------- tests ---------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn row(id: &str, name: &str, kind: &str) -> String {
        let mut f = vec![String::new(); schema::ARITY];
        f[0] = id.into();
        f[1] = name.into();
        f[2] = kind.into();
        f.join(",")
    }

    fn doc(body: &str) -> String {
        format!(
            "// data.js\nconst RAW = `\n{}`.trim();\n\nexport const REGIONS = 1;\n",
            body
        )
    }

    #[test]
    fn parse_extracts_rows_and_keeps_comments() {
        let text = doc(&format!(
            "// Field order: id,name,type,...\n{}\n\n{}\n",
            row("us", "United States", "country"),
            row("us-ca", "California", "state"),
        ));
        let t = TableDocument::parse(&text, Path::new("data.js")).unwrap();
        assert_eq!(t.region_count(), 2);
        assert_eq!(t.country_count(), 1);
        let first = t.regions().next().unwrap();
        assert_eq!(first.id(), "us");
        assert_eq!(first.name(), "United States");
        assert!(first.is_country());
        assert_eq!(first.parent(), None);
    }

    #[test]
    fn unmodified_roundtrip_is_byte_identical() {
        let text = doc(&format!(
            "// comment kept verbatim\n{}\n\n{}\n",
            row("us", "United States", "country"),
            row("cn", "China", "country"),
        ));
        let t = TableDocument::parse(&text, Path::new("data.js")).unwrap();
        assert_eq!(t.serialize(), text);
    }

    #[test]
    fn reparse_of_serialized_output_is_equivalent() {
        let text = doc(&format!("{}\n{}\n", row("us", "United States", "country"), row("de", "Germany", "country")));
        let once = TableDocument::parse(&text, Path::new("data.js")).unwrap();
        let twice = TableDocument::parse(&once.serialize(), Path::new("data.js")).unwrap();
        let a: Vec<_> = once.regions().cloned().collect();
        let b: Vec<_> = twice.regions().cloned().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_markers_is_fatal() {
        let err = TableDocument::parse("nothing here", Path::new("x.js")).unwrap_err();
        assert!(matches!(err, PipelineError::TableMarkers { .. }));
    }

    #[test]
    fn wrong_arity_rows_are_reported_not_guessed() {
        let text = doc(&format!("{}\nus,Too,short\n", row("de", "Germany", "country")));
        let err = TableDocument::parse(&text, Path::new("x.js")).unwrap_err();
        match err {
            PipelineError::RowArity { expected, rows } => {
                assert_eq!(expected, schema::ARITY);
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn field_edit_survives_roundtrip() {
        let text = doc(&format!("{}\n", row("us", "United States", "country")));
        let mut t = TableDocument::parse(&text, Path::new("data.js")).unwrap();
        t.regions_mut().next().unwrap().set_field(5, "340.1".into());
        let t2 = TableDocument::parse(&t.serialize(), Path::new("data.js")).unwrap();
        assert_eq!(t2.regions().next().unwrap().field(5), "340.1");
    }

    #[test]
    fn indented_sources_note_keeps_its_indentation() {
        let text = doc(&format!(
            "  // Sources: old note\n{}\n",
            row("us", "United States", "country")
        ));
        let mut t = TableDocument::parse(&text, Path::new("data.js")).unwrap();
        t.set_sources_note(2024);
        let out = t.serialize();
        assert!(out.contains("\n  // Sources: World Bank API (country data unified to 2024)"));
        assert!(!out.contains("old note"));
    }

    #[test]
    fn sources_note_is_rewritten() {
        let text = doc(&format!(
            "// Sources: old note\n{}\n",
            row("us", "United States", "country")
        ));
        let mut t = TableDocument::parse(&text, Path::new("data.js")).unwrap();
        t.set_sources_note(2023);
        let out = t.serialize();
        assert!(out.contains("unified to 2023"));
        assert!(!out.contains("old note"));
    }
}
