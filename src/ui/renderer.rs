//! Plain-text rendering of a [`ListViewModel`].
//!
//! The renderer writes a self-contained block: header, optional search and
//! error lines, the table (or the loading / empty message that replaces it)
//! and the footer. It does not clear the screen or move the cursor, so
//! successive renders scroll like a log.

use crate::ui::helpers::{char_width, highlight, pad, BOLD, DIM, RESET};
use crate::ui::viewmodel::{ListViewModel, Loading};
use std::fmt::Write as _;

const COLUMN_GAP: &str = "  ";

/// Renders the view model to stdout.
pub fn render(vm: &ListViewModel) {
    print!("{}", render_to_string(vm));
}

/// Renders the view model into a string.
#[must_use]
pub fn render_to_string(vm: &ListViewModel) -> String {
    let mut out = String::new();

    let _ = write!(out, "{BOLD}{}{RESET}", vm.header.title);
    if let Some(filters) = &vm.header.filters {
        let _ = write!(out, "  {DIM}[{filters}]{RESET}");
    }
    if vm.loading == Loading::Overlay {
        let _ = write!(out, "  {DIM}actualizando…{RESET}");
    }
    out.push('\n');

    if let Some(search) = &vm.search_bar {
        let _ = writeln!(out, "Buscar: {}", search.query);
    }
    if let Some(error) = &vm.error_banner {
        let _ = writeln!(out, "! {error}");
    }

    if vm.loading == Loading::Initial {
        let _ = writeln!(out, "Cargando…");
    } else if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out, "{}", empty.message);
        let _ = writeln!(out, "{DIM}{}{RESET}", empty.subtitle);
    } else if !vm.rows.is_empty() {
        render_table(&mut out, vm);
    }

    let _ = writeln!(out, "{}  {DIM}{}{RESET}", vm.footer.page_label, vm.footer.keybindings);
    out
}

fn render_table(out: &mut String, vm: &ListViewModel) {
    let mut widths: Vec<usize> = vm.columns.iter().map(|c| char_width(c)).collect();
    for row in &vm.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(char_width(cell));
            }
        }
    }
    let id_width = vm
        .rows
        .iter()
        .map(|r| char_width(&r.id.to_string()))
        .max()
        .unwrap_or(0)
        .max(2);

    let _ = write!(out, "{BOLD}{}", pad("ID", id_width));
    for (heading, width) in vm.columns.iter().zip(&widths) {
        let _ = write!(out, "{COLUMN_GAP}{}", pad(heading, *width));
    }
    let _ = writeln!(out, "{RESET}");

    for row in &vm.rows {
        let _ = write!(out, "{}", pad(&row.id.to_string(), id_width));
        for (i, (cell, width)) in row.cells.iter().zip(&widths).enumerate() {
            let padding = width.saturating_sub(char_width(cell));
            let text = if i == 0 {
                highlight(cell, &row.highlight_ranges)
            } else {
                cell.clone()
            };
            let _ = write!(out, "{COLUMN_GAP}{text}{}", " ".repeat(padding));
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{DisplayRow, EmptyState, FooterInfo, HeaderInfo};

    fn viewmodel() -> ListViewModel {
        ListViewModel {
            header: HeaderInfo {
                title: "Clientes (2)".to_string(),
                filters: None,
            },
            columns: vec!["Cliente".to_string(), "CCP".to_string()],
            rows: vec![
                DisplayRow {
                    id: 1,
                    cells: vec!["Acme".to_string(), "ACM".to_string()],
                    highlight_ranges: vec![(0, 2)],
                },
                DisplayRow {
                    id: 12,
                    cells: vec!["Globex Corp".to_string(), "GLX".to_string()],
                    highlight_ranges: vec![],
                },
            ],
            footer: FooterInfo {
                page_label: "Página 1 de 1".to_string(),
                keybindings: "q: salir".to_string(),
            },
            loading: Loading::None,
            error_banner: None,
            empty_state: None,
            search_bar: None,
        }
    }

    #[test]
    fn table_columns_align() {
        let out = render_to_string(&viewmodel());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], format!("{BOLD}Clientes (2){RESET}"));
        assert_eq!(lines[1], format!("{BOLD}ID  Cliente      CCP{RESET}"));
        assert_eq!(lines[2], format!("1   {BOLD}Ac{RESET}me         ACM"));
        assert_eq!(lines[3], "12  Globex Corp  GLX");
    }

    #[test]
    fn initial_load_replaces_table() {
        let mut vm = viewmodel();
        vm.rows.clear();
        vm.loading = Loading::Initial;
        let out = render_to_string(&vm);
        assert!(out.contains("Cargando…"));
        assert!(!out.contains("CCP"));
    }

    #[test]
    fn error_banner_keeps_rows() {
        let mut vm = viewmodel();
        vm.error_banner = Some("Error 500: Internal Server Error".to_string());
        let out = render_to_string(&vm);
        assert!(out.contains("! Error 500: Internal Server Error"));
        assert!(out.contains("Globex Corp"));
    }

    #[test]
    fn empty_state_is_shown() {
        let mut vm = viewmodel();
        vm.rows.clear();
        vm.empty_state = Some(EmptyState {
            message: "No se encontraron clientes".to_string(),
            subtitle: "Ajusta o limpia los filtros de búsqueda".to_string(),
        });
        let out = render_to_string(&vm);
        assert!(out.contains("No se encontraron clientes"));
    }
}
