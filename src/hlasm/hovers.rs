//! Hover provider.
//!
//! Resolves the word under the cursor against four sources in a fixed
//! precedence order: a declared `EQUREG` name first, then a bare `Rn`
//! register reference, then a catalogue macro, then a catalogue field.
//! The first match wins; lower-precedence sources are never consulted
//! once a higher one matches.

use lsp_types as lsp;

use crate::hlasm::catalogue::{Catalogue, FieldDef};
use crate::hlasm::state::AnalysisState;

/// The architectural register convention table, displayed verbatim in the
/// fenced block of a bare-`Rn` hover. Indexed 0-15.
const REGISTER_CONVENTIONS: [&str; 16] = [
    "R0  — Work register / parameter passing",
    "R1  — Parameter pointer / work register",
    "R2  — Work register",
    "R3  — Work register",
    "R4  — Work register",
    "R5  — Work register",
    "R6  — Work register",
    "R7  — Work register",
    "R8  — Work register",
    "R9  — Work register",
    "R10 — Work register",
    "R11 — Work register",
    "R12 — Base register (conventional)",
    "R13 — Save area pointer",
    "R14 — Return address",
    "R15 — Entry point / return code",
];

fn hover_text(body: String) -> lsp::Hover {
    lsp::Hover {
        contents: lsp::HoverContents::Markup(lsp::MarkupContent { kind: lsp::MarkupKind::Markdown, value: body }),
        range: None,
    }
}

fn as_register_number(word: &str) -> Option<u8> {
    let word = word.trim();
    let mut chars = word.chars();
    match chars.next() {
        Some('R') | Some('r') => {}
        _ => return None,
    }
    let rest: String = chars.collect();
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: u32 = rest.parse().ok()?;
    if n <= 15 {
        Some(n as u8)
    } else {
        None
    }
}

fn macro_panel(m: &crate::hlasm::catalogue::MacroDef) -> String {
    let mut parts = vec![format!("## {}", m.name)];
    if !m.description.is_empty() {
        parts.push(m.description.clone());
    }
    if !m.parameters.is_empty() {
        let list = m.parameters.iter().map(|p| format!("- {p}")).collect::<Vec<_>>().join("\n");
        parts.push(format!("**Parameters:**\n{list}"));
    }
    if !m.category.is_empty() {
        parts.push(format!("*Category: {}*", m.category));
    }
    if !m.source.is_empty() {
        parts.push(format!("*Source: {}*", m.source));
    }
    parts.join("\n\n")
}

fn field_panel(f: &FieldDef) -> String {
    let mut parts = vec![format!("## {} ({})", f.name, f.control_block)];
    if !f.description.is_empty() {
        parts.push(f.description.clone());
    }
    let mut rows = Vec::new();
    if !f.control_block.is_empty() {
        rows.push(format!("| Control Block | {} |", f.control_block));
    }
    if !f.field_type.is_empty() {
        rows.push(format!("| Field Type | {} |", f.field_type));
    }
    if !f.storage_type.is_empty() {
        rows.push(format!("| Storage Type | {} |", f.storage_type));
    }
    if f.length != 0 {
        rows.push(format!("| Length | {} |", f.length));
    }
    if !f.parent.is_empty() {
        rows.push(format!("| Parent | {} |", f.parent));
    }
    if !rows.is_empty() {
        let mut table = vec!["| Property | Value |".to_string(), "|---|---|".to_string()];
        table.extend(rows);
        parts.push(table.join("\n"));
    }
    parts.join("\n\n")
}

/// Build the hover markdown for `word`, or `None` if none of the four
/// sources recognise it.
pub fn hover(state: &AnalysisState, catalogue: &Catalogue, word: &str) -> Option<lsp::Hover> {
    let upper = word.to_uppercase();

    if let Some(descriptor) = state.regs.get(&upper) {
        return Some(hover_text(format!(
            "## {} (EQUREG)\n\nRegister R{}, type: {}",
            descriptor.name,
            descriptor.reg,
            descriptor.rtype.name()
        )));
    }

    if let Some(n) = as_register_number(&upper) {
        return Some(hover_text(format!("## Register R{n}\n\n```\n{}\n```", REGISTER_CONVENTIONS[n as usize])));
    }

    if let Some(m) = catalogue.find_macro(&upper) {
        return Some(hover_text(macro_panel(m)));
    }

    if let Some(f) = catalogue.find_field(&upper) {
        return Some(hover_text(field_panel(f)));
    }

    None
}

#[cfg(test)]
mod hovers_test {
    use super::*;
    use crate::hlasm::state::analyse;

    fn catalogue_with(macro_name: &str, field_name: &str) -> Catalogue {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("macros.json"),
            format!(
                r#"{{"macros":[{{"name":"{macro_name}","description":"does a thing","parameters":["a"],"category":"misc","source":"x.mac"}}],
                    "controlBlocks":{{"CB":{{"fields":[{{"name":"{field_name}","description":"a field","fieldType":"CHAR"}}]}}}}}}"#
            ),
        )
        .unwrap();
        Catalogue::load(dir.path())
    }

    #[test]
    fn equreg_takes_precedence_over_bare_register() {
        let state = analyse("FPR      EQUREG R3,F\n");
        let cat = Catalogue::default();
        let h = hover(&state, &cat, "FPR").unwrap();
        match h.contents {
            lsp::HoverContents::Markup(m) => {
                assert!(m.value.starts_with("## FPR (EQUREG)"));
                assert!(m.value.contains("type: float"));
            }
            _ => panic!("expected markup"),
        }
    }

    #[test]
    fn bare_register_hover_renders_convention_table() {
        let state = analyse("");
        let cat = Catalogue::default();
        let h = hover(&state, &cat, "R12").unwrap();
        match h.contents {
            lsp::HoverContents::Markup(m) => {
                assert!(m.value.starts_with("## Register R12"));
                assert!(m.value.contains("R12 — Base register (conventional)"));
            }
            _ => panic!("expected markup"),
        }
    }

    #[test]
    fn macro_hover_when_not_a_register() {
        let state = analyse("");
        let cat = catalogue_with("SAVE", "FLDA");
        let h = hover(&state, &cat, "SAVE").unwrap();
        match h.contents {
            lsp::HoverContents::Markup(m) => {
                assert!(m.value.starts_with("## SAVE"));
                assert!(m.value.contains("**Parameters:**"));
                assert!(m.value.contains("*Category: misc*"));
            }
            _ => panic!("expected markup"),
        }
    }

    #[test]
    fn field_hover_as_last_resort() {
        let state = analyse("");
        let cat = catalogue_with("SAVE", "FLDA");
        let h = hover(&state, &cat, "FLDA").unwrap();
        match h.contents {
            lsp::HoverContents::Markup(m) => assert!(m.value.starts_with("## FLDA (CB)")),
            _ => panic!("expected markup"),
        }
    }

    #[test]
    fn unknown_word_has_no_hover() {
        let state = analyse("");
        let cat = Catalogue::default();
        assert!(hover(&state, &cat, "NOPE").is_none());
    }

    #[test]
    fn macro_beats_field_when_both_define_the_same_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("macros.json"),
            r#"{"macros":[{"name":"DUP"}],"controlBlocks":{"CB":{"fields":[{"name":"DUP"}]}}}"#,
        )
        .unwrap();
        let cat = Catalogue::load(dir.path());
        let state = analyse("");
        let h = hover(&state, &cat, "DUP").unwrap();
        match h.contents {
            lsp::HoverContents::Markup(m) => assert!(!m.value.contains('(')),
            _ => panic!("expected markup"),
        }
    }

    #[test]
    fn bare_register_beats_macro_of_the_same_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("macros.json"), r#"{"macros":[{"name":"R3"}]}"#).unwrap();
        let cat = Catalogue::load(dir.path());
        let state = analyse("");
        let h = hover(&state, &cat, "R3").unwrap();
        match h.contents {
            lsp::HoverContents::Markup(m) => assert!(m.value.starts_with("## Register R3")),
            _ => panic!("expected markup"),
        }
    }
}
