use crate::prelude::*;
use std::collections::HashMap;

/// Represents estimate output in different formats for rendering.
///
/// Can hold a money total, a token total, a keyed grouping of either
/// (per task, per tier, per content type), or the raw JSON report.
#[derive(Serialize)]
pub enum Report {
    /// Total cost in the reporting currency.
    Money(f64),
    /// Total token count. Estimates, so fractional under the hood.
    Tokens(f64),
    /// Grouped values, keyed by task, tier or content-type name.
    Map(HashMap<String, Report>),
    /// Raw JSON dump for the raw command.
    Raw(String),
}

impl Report {
    pub fn money_map(map: HashMap<String, f64>) -> Report {
        let converted = map
            .into_iter()
            .map(|(k, v)| (k, Report::Money(v)))
            .collect();

        Report::Map(converted)
    }

    pub fn token_map(map: HashMap<String, f64>) -> Report {
        let converted = map
            .into_iter()
            .map(|(k, v)| (k, Report::Tokens(v)))
            .collect();

        Report::Map(converted)
    }

    /// Renders the report into a string based on its variant.
    /// - Maps become CSV data.
    /// - Numeric values become formatted strings.
    pub fn render(&self, no_format: bool, with_symbol: Option<bool>) -> AppResult<String> {
        match self {
            Report::Tokens(number) => Ok(Self::render_tokens(number, no_format)),
            Report::Money(number) => Ok(Self::render_money(number, no_format, with_symbol)),

            // Map reports: serialize to CSV.
            Report::Map(_) => self.format_csv(no_format),

            Report::Raw(json) => Ok(json.clone()),
        }
    }

    /// Internal helper: serializes map data into a valid CSV string.
    fn format_csv(&self, no_format: bool) -> AppResult<String> {
        match self {
            Report::Map(groups) => {
                /// Temporary struct to define the CSV column layout.
                /// Two columns: entity name and formatted value.
                #[derive(Serialize)]
                struct CsvRow {
                    /// Left column, for an entity name.
                    display_name: String,
                    /// Right column, for the formatted value.
                    content: String,
                }

                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false) // I don't want a header.
                    .from_writer(vec![]);

                // HashMap iteration order is arbitrary, and flapping rows
                // make diffs useless. Sort by key before writing.
                let mut rows: Vec<_> = groups.iter().collect();
                rows.sort_by(|a, b| a.0.cmp(b.0));

                for (key, value) in rows {
                    let (display_name, content) = match value {
                        // Money inside a csv gets the cost in the name.
                        // example: "chat ($1.23)"
                        //
                        // This works well for piping to tools like uplot:
                        // - The display string is in the left cell.
                        // - The numeric value is in the right cell for
                        //   sorting, since dollar-prefixed numbers can't be
                        //   sorted programmatically.
                        Report::Money(_) => {
                            // Make render's with_symbol shadow the no_format
                            // flip. Basically: if no format, no dollar sign.
                            let cost_with_symbol = value.render(no_format, Some(!no_format))?;
                            let cost_without_symbol = value.render(no_format, Some(false))?;

                            let display_column = format!("{} ({})", key, cost_with_symbol);

                            (display_column, cost_without_symbol)
                        }
                        _ => (key.clone(), value.render(no_format, None)?),
                    };

                    let row = CsvRow {
                        display_name,
                        content,
                    };

                    writer
                        .serialize(row)
                        .into_diagnostic()
                        .wrap_err("Failed to serialize grouped data row to CSV format")?;
                }

                let data = writer
                    .into_inner()
                    .into_diagnostic()
                    .wrap_err("Failed to get writer data.")?;

                let csv_string = String::from_utf8(data)
                    .into_diagnostic()
                    .wrap_err("Invalid utf-8")?;

                Ok(csv_string)
            }

            _ => unreachable!("Logic error: format_csv called on a non-Map variant."),
        }
    }

    // Internal helpers: format numeric variants, optionally removing units.

    fn render_tokens(value: &f64, no_format: bool) -> String {
        if no_format {
            return value.to_string();
        }

        // Fractional tokens are an artifact of the chars/token ratio, nobody
        // plans capacity on half a token.
        format!("{:.0}", value)
    }

    /// Render money.
    /// with_symbol is optional; default is true.
    fn render_money(value: &f64, no_format: bool, with_symbol: Option<bool>) -> String {
        if no_format {
            // example: 1.23456
            return value.to_string();
        }

        let symbol = if with_symbol.unwrap_or(true) { "$" } else { "" };

        // example: $1.23 or 1.23, depending on optional with_symbol.
        format!("{}{:.2}", symbol, value)
    }
}
