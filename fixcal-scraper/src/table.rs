//! Fixtures table extraction.

use scraper::{ElementRef, Html, Selector};

use fixcal_core::constants::FIXTURES_TABLE_NAME;
use fixcal_core::error::{FixtureError, Result};
use fixcal_core::types::Fixture;

/// Finds the first `<table name="fixturestable">` in the document.
pub fn find_fixtures_table(doc: &Html) -> Result<ElementRef<'_>> {
    let selector = selector(&format!(r#"table[name="{}"]"#, FIXTURES_TABLE_NAME))?;
    doc.select(&selector)
        .next()
        .ok_or(FixtureError::TableNotFound)
}

/// Returns the text of every `<td>`, one vector per `<tr>`.
///
/// A cell's text is the concatenation of its trimmed text nodes. Rows without
/// `<td>` cells (header rows) are left out.
pub fn parse_table(table: ElementRef<'_>) -> Result<Vec<Vec<String>>> {
    let rows = selector("tr")?;

    let data: Vec<Vec<String>> = table
        .select(&rows)
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| cell.value().name() == "td")
                .map(|cell| cell.text().map(str::trim).collect::<String>())
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    if data.is_empty() {
        return Err(FixtureError::NoFixtures);
    }
    Ok(data)
}

/// Keeps the rows shaped like fixtures.
pub fn parse_fixtures(rows: &[Vec<String>]) -> Vec<Fixture> {
    rows.iter().filter_map(|row| Fixture::from_row(row.as_slice())).collect()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| FixtureError::ConfigError(format!("invalid selector {:?}: {}", css, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <table name="menu"><tr><td>Home</td></tr></table>
          <table name="fixturestable">
            <tr><th>Date</th><th>Home</th><th></th><th>Away</th><th>Time</th><th>Venue</th></tr>
            <tr><td colspan="6"><b>September</b></td></tr>
            <tr>
              <td> 14 Sep 2024 </td><td><a href="/t/1">Ramblers</a></td><td>2 - 1</td>
              <td>Wanderers</td><td>2:30pm</td><td>Park Lane</td>
            </tr>
            <tr>
              <td>21 Sep 2024</td><td>Wanderers</td><td></td>
              <td>Ramblers</td><td>11.00am</td><td>Riverside</td>
            </tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_find_fixtures_table() {
        let doc = Html::parse_document(PAGE);
        let table = find_fixtures_table(&doc).unwrap();
        assert_eq!(table.value().attr("name"), Some("fixturestable"));
    }

    #[test]
    fn test_missing_table() {
        let doc = Html::parse_document("<html><table name='other'></table></html>");
        assert!(matches!(find_fixtures_table(&doc), Err(FixtureError::TableNotFound)));
    }

    #[test]
    fn test_parse_table_rows() {
        let doc = Html::parse_document(PAGE);
        let rows = parse_table(find_fixtures_table(&doc).unwrap()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["September"]);
        assert_eq!(
            rows[1],
            vec!["14 Sep 2024", "Ramblers", "2 - 1", "Wanderers", "2:30pm", "Park Lane"]
        );
        // The last row is kept too.
        assert_eq!(rows[2][5], "Riverside");
    }

    #[test]
    fn test_parse_fixtures_skips_odd_rows() {
        let doc = Html::parse_document(PAGE);
        let rows = parse_table(find_fixtures_table(&doc).unwrap()).unwrap();
        let fixtures = parse_fixtures(&rows);

        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].home, "Ramblers");
        assert_eq!(fixtures[1].score, "");
    }

    #[test]
    fn test_empty_table() {
        let doc = Html::parse_document(
            r#"<table name="fixturestable"><tr><th>Date</th></tr></table>"#,
        );
        let table = find_fixtures_table(&doc).unwrap();
        assert!(matches!(parse_table(table), Err(FixtureError::NoFixtures)));
    }
}
