use std::io::{self, Write};

use coinpulse_core::{Asset, AssetDetail, Currency, FetchError};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::{CommandResult, View};
use crate::error::CliError;

const DESCRIPTION_LIMIT: usize = 280;

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    write_result(&mut stdout.lock(), &mut stderr.lock(), result, format, pretty)
}

/// Data goes to `out`; failure notices in table mode go to `err`.
pub fn write_result<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    result: &CommandResult,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, result, pretty),
        OutputFormat::Table => {
            for (index, view) in result.views.iter().enumerate() {
                if index > 0 {
                    writeln!(out)?;
                }
                match view {
                    View::List {
                        currency,
                        search,
                        assets,
                    } => write_list_table(out, *currency, search.as_deref(), assets)?,
                    View::Detail { currency, detail } => {
                        write_detail_table(out, *currency, detail)?
                    }
                    View::Empty { resource } => writeln!(out, "{resource}: nothing to show")?,
                    View::Failure { resource, error } => write_failure(err, resource, error)?,
                }
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    views: Vec<JsonView<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum JsonView<'a> {
    List {
        currency: Currency,
        search: Option<&'a str>,
        assets: &'a [Asset],
    },
    Detail {
        currency: Currency,
        detail: &'a AssetDetail,
    },
    Empty {
        resource: &'a str,
    },
    Error {
        resource: &'a str,
        code: &'static str,
        message: String,
        status: Option<u16>,
        allows_back_navigation: bool,
    },
}

impl<'a> From<&'a View> for JsonView<'a> {
    fn from(view: &'a View) -> Self {
        match view {
            View::List {
                currency,
                search,
                assets,
            } => Self::List {
                currency: *currency,
                search: search.as_deref(),
                assets: assets.as_slice(),
            },
            View::Detail { currency, detail } => Self::Detail {
                currency: *currency,
                detail,
            },
            View::Empty { resource } => Self::Empty { resource },
            View::Failure { resource, error } => Self::Error {
                resource,
                code: error.code(),
                message: error.user_message(),
                status: error.status(),
                allows_back_navigation: error.allows_back_navigation(),
            },
        }
    }
}

fn write_json<W: Write>(out: &mut W, result: &CommandResult, pretty: bool) -> Result<(), CliError> {
    let document = JsonDocument {
        views: result.views.iter().map(JsonView::from).collect(),
    };
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &document)?;
    } else {
        serde_json::to_writer(&mut *out, &document)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_list_table<W: Write>(
    out: &mut W,
    currency: Currency,
    search: Option<&str>,
    assets: &[Asset],
) -> io::Result<()> {
    if let Some(term) = search {
        writeln!(out, "search: {term} ({} match(es))", assets.len())?;
    }
    if assets.is_empty() {
        return writeln!(out, "no assets to show");
    }

    let price_header = format!("PRICE ({currency})");
    writeln!(
        out,
        "{:>4}  {:<24} {:<8} {:>18} {:>9}",
        "#", "NAME", "SYMBOL", price_header, "24H"
    )?;
    for asset in assets {
        let rank = asset
            .market_cap_rank
            .map_or_else(|| String::from("-"), |rank| rank.to_string());
        writeln!(
            out,
            "{:>4}  {:<24} {:<8} {:>18} {:>9}",
            rank,
            truncate(&asset.name, 24),
            asset.symbol.to_uppercase(),
            format_price(asset.current_price),
            format_change(asset.price_change_percentage_24h),
        )?;
    }
    Ok(())
}

fn write_detail_table<W: Write>(
    out: &mut W,
    currency: Currency,
    detail: &AssetDetail,
) -> io::Result<()> {
    writeln!(out, "{} ({})", detail.name, detail.symbol.to_uppercase())?;
    if let Some(rank) = detail.market_cap_rank {
        writeln!(out, "rank:           #{rank}")?;
    }
    writeln!(
        out,
        "price ({currency}):    {}",
        format_price(detail.price_in(currency))
    )?;
    writeln!(
        out,
        "24h change:     {}",
        format_change(detail.market_data.price_change_percentage_24h)
    )?;
    writeln!(
        out,
        "market cap:     {}",
        format_large(detail.market_data.market_cap.in_currency(currency))
    )?;
    writeln!(
        out,
        "volume (24h):   {}",
        format_large(detail.market_data.total_volume.in_currency(currency))
    )?;
    if let Some(supply) = detail.market_data.circulating_supply {
        writeln!(out, "circulating:    {}", format_large(Some(supply)))?;
    }
    if let Some(updated) = detail.last_updated {
        writeln!(out, "updated:        {updated}")?;
    }
    if let Some(homepage) = detail.links.primary_homepage() {
        writeln!(out, "homepage:       {homepage}")?;
    }
    if let Some(description) = detail.description.preferred() {
        writeln!(out)?;
        writeln!(out, "{}", truncate(description.trim(), DESCRIPTION_LIMIT))?;
    }
    Ok(())
}

fn write_failure<E: Write>(err: &mut E, resource: &str, error: &FetchError) -> io::Result<()> {
    writeln!(err, "{resource}: {}", error.user_message())?;
    if error.allows_back_navigation() {
        writeln!(err, "hint: run `coinpulse list` to go back to the listing")?;
    }
    Ok(())
}

fn format_price(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("-"), |value| format!("{value:.2}"))
}

/// Two decimals with a T/B/M/K suffix past a thousand.
fn format_large(value: Option<f64>) -> String {
    const SCALES: [(f64, &str); 4] = [
        (1_000_000_000_000.0, "T"),
        (1_000_000_000.0, "B"),
        (1_000_000.0, "M"),
        (1_000.0, "K"),
    ];

    let Some(value) = value else {
        return String::from("-");
    };
    SCALES
        .iter()
        .find(|(scale, _)| value.abs() >= *scale)
        .map_or_else(
            || format!("{value:.2}"),
            |(scale, suffix)| format!("{:.2}{suffix}", value / scale),
        )
}

fn format_change(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("-"), |value| format!("{value:+.2}%"))
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    let mut shortened: String = text.chars().take(limit.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
