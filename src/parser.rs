//! HTML parser for the site's paginated statistics tables.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::source::RawRow;

/// One parsed table page: its data rows plus whether more pages follow.
#[derive(Debug, Default)]
pub struct StatsPage {
    pub rows: Vec<RawRow>,
    pub has_next: bool,
}

/// Rank column, consumed for repeat detection and not carried into rows.
const RANK_COLUMN: &str = "RANK";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector `{css}`: {e}"))
}

/// Extracts the statistics table from one page of HTML.
///
/// Columns with empty header text are dropped. Rows whose RANK cell is not
/// a plain number are the visually repeated rows the site's paginator
/// injects; they are discarded, each leaving a `debug` trace so a
/// legitimately non-numeric rank would be visible in the logs rather than
/// lost silently.
///
/// Pagination state: a further page exists when the page has an enabled
/// next-page link, i.e. `a.next_page` present and `span.next_page.disabled`
/// absent.
///
/// # Errors
///
/// Returns an error if the page has no `table#stats-table-rows`.
pub fn parse_stats_page(html: &str) -> Result<StatsPage> {
    let document = Html::parse_document(html);

    let table_sel = selector("table#stats-table-rows")?;
    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| anyhow!("statistics table not found in page"))?;

    let header_sel = selector("thead th")?;
    let headers: Vec<String> = table.select(&header_sel).map(cell_text).collect();

    let row_sel = selector("tbody tr")?;
    let cell_sel = selector("td")?;

    let mut rows = Vec::new();

    for tr in table.select(&row_sel) {
        let cells = tr.select(&cell_sel).map(cell_text);

        let mut row = RawRow::new();
        let mut rank: Option<String> = None;

        for (header, cell) in headers.iter().zip(cells) {
            if header.is_empty() {
                continue;
            }
            if header == RANK_COLUMN {
                rank = Some(cell);
                continue;
            }
            row.insert(header.clone(), Value::String(cell));
        }

        match rank {
            Some(r) if is_numeric(&r) => rows.push(row),
            Some(r) => debug!(rank = %r, "Discarding repeated row with non-numeric rank"),
            // Tables without a RANK column have no repeat markers to filter.
            None => rows.push(row),
        }
    }

    let disabled_sel = selector("span.next_page.disabled")?;
    let next_sel = selector("a.next_page")?;
    let has_next = document.select(&disabled_sel).next().is_none()
        && document.select(&next_sel).next().is_some();

    Ok(StatsPage { rows, has_next })
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
