//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Auction · command (context)"
/// Plain mode: "auction command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Auction", styles::bold(), ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("auction {}", command),
        OutputMode::Json => String::new(),
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let badge_text = kind.display(ctx.unicode);
    let colored_badge = styled(badge_text, kind.style(), ctx.color);

    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
///
/// Pretty mode: "Hint: text" with dim styling
/// Plain mode: "hint=text"
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, String)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub numeric: bool,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            numeric: false,
        }
    }

    /// A right-aligned column for amounts.
    pub const fn numeric(header: &'static str) -> Self {
        Self {
            header,
            numeric: true,
        }
    }
}

fn align_numeric(table: &mut ComfyTable, columns: &[Column]) {
    for (i, col) in columns.iter().enumerate() {
        if col.numeric {
            if let Some(column) = table.column_mut(i) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
    }
}

/// Separator between fields of a plain record.
pub const PLAIN_FIELD_SEPARATOR: &str = "\t";

fn plain_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join(PLAIN_FIELD_SEPARATOR))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a bordered table using comfy-table for pretty mode.
///
/// Pretty mode: Styled table with borders
/// Plain mode: Tab-separated values (no header)
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }

    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(comfy_table::presets::ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
    table.set_header(headers);
    for row in rows {
        table.add_row(row);
    }
    align_numeric(&mut table, columns);

    table.to_string()
}

/// Render a simple table without borders (for player lists).
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }

    let mut table = ComfyTable::new();
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|c| {
            let mut cell = Cell::new(c.header);
            if ctx.color {
                cell = cell.add_attribute(Attribute::Dim);
            }
            cell
        })
        .collect();
    table.set_header(header_cells);

    for i in 0..columns.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }
    for row in rows {
        table.add_row(row);
    }
    align_numeric(&mut table, columns);

    table.to_string()
}

/// Print a message to stdout with proper mode handling.
///
/// In JSON mode, this does nothing (JSON output should be handled separately).
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_modes() {
        assert_eq!(header(&plain_ctx(), "teams", Some("Men")), "auction teams");
        let pretty = header(&pretty_ctx(), "teams", Some("Men"));
        assert!(pretty.contains("Auction"));
        assert!(pretty.contains("(Men)"));
    }

    #[test]
    fn test_kv_plain_snake_cases_key() {
        assert_eq!(kv(&plain_ctx(), "Remaining Budget", "600"), "remaining_budget=600");
    }

    #[test]
    fn test_hint_modes() {
        assert_eq!(hint(&plain_ctx(), "try this"), "hint=try this");
        assert!(hint(&pretty_ctx(), "try this").contains("Hint:"));
    }

    #[test]
    fn test_receipt_plain() {
        let items = [("Player", "Virat".to_string()), ("Amount", "400".to_string())];
        let r = receipt(&plain_ctx(), "Sold", &items);
        assert_eq!(r, "status=ok\nplayer=Virat\namount=400");
    }

    #[test]
    fn test_receipt_pretty() {
        let items = [("Player", "Virat".to_string())];
        let r = receipt(&pretty_ctx(), "Sold", &items);
        assert!(r.contains("[\u{2713}] Sold"));
        assert!(r.contains("  Player: Virat"));
    }

    #[test]
    fn test_table_plain() {
        let columns = [Column::new("Team"), Column::numeric("Remaining")];
        let rows = vec![vec!["Strikers".to_string(), "600".to_string()]];
        assert_eq!(table(&plain_ctx(), &columns, &rows), "Strikers\t600");
    }

    #[test]
    fn test_table_pretty_has_headers() {
        let columns = [Column::new("Team"), Column::numeric("Remaining")];
        let rows = vec![vec!["Strikers".to_string(), "600".to_string()]];
        let t = table(&pretty_ctx(), &columns, &rows);
        assert!(t.contains("Team"));
        assert!(t.contains("Remaining"));
        assert!(t.contains("Strikers"));
    }

    #[test]
    fn test_simple_table_pretty_has_headers() {
        let columns = [Column::new("Player"), Column::numeric("Price")];
        let rows = vec![vec!["Virat".to_string(), "400".to_string()]];
        let t = simple_table(&pretty_ctx(), &columns, &rows);
        assert!(t.contains("Player"));
        assert!(t.contains("Virat"));
    }

    #[test]
    fn test_error_message_modes() {
        let e = error_message(&pretty_ctx(), "Something went wrong", Some("Try again"));
        assert!(e.contains("Something went wrong"));
        assert!(e.contains("Hint: Try again"));

        let plain = error_message(&plain_ctx(), "Something went wrong", Some("Try again"));
        assert_eq!(plain, "error=Something went wrong\nhint=Try again");
    }
}
