use std::io::Write;
use std::path::Path;

use auction_core::fs::{rename_with_fallback, sibling_temp_path};
use auction_core::{export_rows, ExportRow};

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::helpers::{parse_category, parse_export_format, ExportFormat};
use crate::ui::{print, receipt};

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let category = parse_category(&args.category)?;
    let format = parse_export_format(&args.format)?;

    let mut auction = ctx.open_auction()?;
    let rosters = auction.query_teams(category)?;
    let rows = export_rows(&rosters);
    let bytes = render_rows(&rows, format)?;

    match &args.output {
        Some(output) => {
            write_atomic(Path::new(output), &bytes)?;
            if !ctx.quiet() {
                let ui_ctx = ctx.ui_context(false, None);
                print(
                    &ui_ctx,
                    &receipt(
                        &ui_ctx,
                        &format!("Exported {} results", category),
                        &[
                            ("Path", output.clone()),
                            ("Rows", rows.len().to_string()),
                        ],
                    ),
                );
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn render_rows(rows: &[ExportRow], format: ExportFormat) -> anyhow::Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in rows {
                writer.serialize(row)?;
            }
            writer
                .into_inner()
                .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e))
        }
        ExportFormat::Json => {
            let mut out = serde_json::to_vec_pretty(rows)?;
            out.push(b'\n');
            Ok(out)
        }
        ExportFormat::Jsonl => {
            let mut out = Vec::new();
            for row in rows {
                serde_json::to_writer(&mut out, row)?;
                out.push(b'\n');
            }
            Ok(out)
        }
    }
}

fn write_atomic(destination: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let temp_path = sibling_temp_path(destination)?;
    std::fs::write(&temp_path, bytes).map_err(|e| {
        anyhow::anyhow!("Failed to write export to {}: {}", temp_path.display(), e)
    })?;
    rename_with_fallback(&temp_path, destination)
        .map_err(|e| anyhow::anyhow!("Atomic rename failed: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ExportRow> {
        vec![
            ExportRow {
                team_name: "Strikers".into(),
                player_name: "Virat".into(),
                sold_price: 400,
                category: "Men".into(),
            },
            ExportRow {
                team_name: "Falcons".into(),
                player_name: "No Players".into(),
                sold_price: 0,
                category: "Men".into(),
            },
        ]
    }

    #[test]
    fn test_csv_uses_column_headers() {
        let out = String::from_utf8(render_rows(&sample(), ExportFormat::Csv).unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Team Name,Player Name,Sold Price,Category"));
        assert_eq!(lines.next(), Some("Strikers,Virat,400,Men"));
        assert_eq!(lines.next(), Some("Falcons,No Players,0,Men"));
    }

    #[test]
    fn test_jsonl_writes_one_object_per_line() {
        let out = String::from_utf8(render_rows(&sample(), ExportFormat::Jsonl).unwrap()).unwrap();
        assert_eq!(out.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert_eq!(first["Team Name"], "Strikers");
    }
}
