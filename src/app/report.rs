use crate::core::regions::RegionTable;
use crate::core::scoring::SCORE_MAX;
use crate::domain::model::{PlaceIndex, ScoreReport};
use crate::utils::error::Result;
use std::fmt::Write as _;
use std::io::Write;

/// `1234567` -> `1,234,567`
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_text(report: &ScoreReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Calculating score for {}, {}...",
        report.place.normalized_name, report.region.name
    );

    let Some(score) = report.score else {
        let _ = writeln!(out, "Unable to calculate score. There might be an issue with the data.");
        return out;
    };

    let _ = writeln!(
        out,
        "Median Home Value: ${}",
        format_thousands(report.metrics.median_home_value)
    );
    let _ = writeln!(
        out,
        "Median Household Income: ${}",
        format_thousands(report.metrics.median_household_income)
    );
    let _ = writeln!(out, "Price-to-Income Ratio: {:.2}", score.ratio);
    let _ = writeln!(out, "Home Buying Score: {:.2} / {:.2}", score.value, SCORE_MAX);
    if let Some(interpretation) = report.interpretation {
        let _ = writeln!(out, "Interpretation: {}", interpretation.message());
    }
    out
}

pub fn render_json(report: &ScoreReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One line per region; regions missing from the code table are marked.
pub fn render_regions(names: &[String], table: &RegionTable) -> String {
    let mut out = String::new();
    for name in names {
        if table.contains(name) {
            let _ = writeln!(out, "{}", name);
        } else {
            let _ = writeln!(out, "{} (not supported)", name);
        }
    }
    out
}

pub fn render_places(places: &PlaceIndex) -> String {
    let mut out = String::new();
    for name in places.names() {
        let _ = writeln!(out, "{}", name);
    }
    out
}

pub fn write_places_csv<W: Write>(places: &PlaceIndex, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["name", "full_name", "place_id"])?;
    for place in places.iter() {
        csv.write_record([&place.normalized_name, &place.full_name, &place.place_id])?;
    }
    csv.flush()?;
    Ok(())
}
