use crate::app::report;
use crate::config::cli::{Command, OutputFormat};
use crate::core::normalizer::{display_name, normalize_name};
use crate::core::service::HomeScoreService;
use crate::core::session::Session;
use crate::domain::ports::StatsSource;
use crate::utils::error::Result;
use std::io::Write;

pub async fn run<S: StatsSource, W: Write>(
    service: &HomeScoreService<S>,
    command: &Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Regions => {
            let names = service.list_regions().await?;
            write!(out, "{}", report::render_regions(&names, service.regions()))?;
        }
        Command::Places { region, csv } => {
            let (region, places) = service.places_in(region).await?;
            tracing::info!("{} places found in {}", places.len(), region.name);
            if *csv {
                report::write_places_csv(&places, &mut *out)?;
            } else {
                write!(out, "{}", report::render_places(&places))?;
            }
        }
        Command::Score {
            region,
            place,
            format,
        } => {
            let mut session = Session::new(service);
            let places = session.select_region(region).await?;

            // Accept the census spelling too, e.g. "Springfield city, California".
            let key = if places.get(place).is_some() {
                place.clone()
            } else {
                normalize_name(display_name(place))
            };
            session.select_place(&key)?;

            let scored = session.calculate().await?;
            match format {
                OutputFormat::Text => write!(out, "{}", report::render_text(scored))?,
                OutputFormat::Json => writeln!(out, "{}", report::render_json(scored)?)?,
            }
        }
    }

    out.flush()?;
    Ok(())
}
