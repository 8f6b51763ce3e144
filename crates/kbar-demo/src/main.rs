// File: crates/kbar-demo/src/main.rs
// Summary: Loads an OHLCV CSV, adds a moving-average overlay and writes a candlestick PNG.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::{Arg, ArgAction, ArgMatches, Command};
use kbar::{FontResolver, KBar, LineStyle, OhlcvFrame, OverlayOptions, PlotOptions, ResolverConfig};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn cli() -> Command {
    Command::new("kbar-demo")
        .about("Render an OHLCV CSV as a candlestick chart with CJK-capable fonts")
        .arg(Arg::new("csv").required(true).help("CSV with date/open/high/low/close[/volume] columns"))
        .arg(Arg::new("font").long("font").help("Font family to prefer over detection"))
        .arg(Arg::new("title").long("title").help("Figure title"))
        .arg(
            Arg::new("mav")
                .long("mav")
                .value_delimiter(',')
                .value_parser(clap::value_parser!(usize))
                .help("Moving-average windows over close, e.g. 5,10"),
        )
        .arg(Arg::new("no-volume").long("no-volume").action(ArgAction::SetTrue).help("Skip the volume panel"))
        .arg(Arg::new("config").long("config").short('c').help("TOML file overriding font resolver settings"))
        .arg(Arg::new("out").long("out").short('o').help("Output PNG path"))
}

fn main() -> Result<()> {
    let _ = kbar::telemetry::init_default_tracing();
    let matches = cli().get_matches();
    run(&matches)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let raw = matches.get_one::<String>("csv").map(String::as_str).unwrap_or_default();
    let (path, used_alt) = resolve_path(raw)?;
    if used_alt {
        info!(path = %path.display(), "extension swapped between .csv/.cvs");
    }

    let frame = load_ohlcv_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    info!(rows = frame.len(), volume = frame.volume().is_some(), "loaded frame");

    let font = matches.get_one::<String>("font").map(String::as_str);
    let mut kbar = match matches.get_one::<String>("config") {
        Some(cfg_path) => {
            let text = std::fs::read_to_string(cfg_path).with_context(|| format!("reading {cfg_path}"))?;
            let config = ResolverConfig::from_toml_str(&text)?;
            KBar::with_resolver(&frame, font, FontResolver::system_with_config(config))
        }
        None => KBar::with_font(&frame, font),
    };

    let window = frame.len().clamp(1, 5);
    let ma = frame.close().rolling_mean(window);
    kbar.add_overlay(ma, OverlayOptions::new().line_style(LineStyle::Dashed).width(1.2))?;

    let volume = !matches.get_flag("no-volume") && frame.volume().is_some();
    if !volume && !matches.get_flag("no-volume") {
        warn!("no volume column, volume panel disabled");
    }
    let out = matches.get_one::<String>("out").map(PathBuf::from).unwrap_or_else(|| out_name(&path));
    let mut opts = PlotOptions::new().volume(volume).savefig(&out);
    if let Some(windows) = matches.get_many::<usize>("mav") {
        opts = opts.mav(windows.copied());
    }
    if let Some(title) = matches.get_one::<String>("title") {
        opts = opts.title(title.clone());
    }

    kbar.plot(false, opts)?;
    println!("Wrote {}", out.display());
    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed. Returns (actual_path, used_alt).
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// target/out/kbar_<stem>.png
fn out_name(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    PathBuf::from("target/out").join(format!("kbar_{stem}.png"))
}

/// Load a CSV with a date column plus OHLC and optional volume into a frame.
fn load_ohlcv_csv(path: &Path) -> Result<OhlcvFrame> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["date", "datetime", "time", "timestamp", "open_time"]);
    let i_open = idx(&["open", "o"]).context("missing open column")?;
    let i_high = idx(&["high", "h"]).context("missing high column")?;
    let i_low = idx(&["low", "l"]).context("missing low column")?;
    let i_close = idx(&["close", "c", "adj_close", "close_price"]).context("missing close column")?;
    let i_volume = idx(&["volume", "vol", "v"]);

    let fallback_start = NaiveDate::from_ymd_opt(2000, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let (mut index, mut open, mut high, mut low, mut close, mut volume) =
        (Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new());

    for rec in rdr.records() {
        let rec = rec?;
        let num = |i: usize| rec.get(i).and_then(|s| s.parse::<f64>().ok());
        let (Some(o), Some(h), Some(l), Some(c)) = (num(i_open), num(i_high), num(i_low), num(i_close)) else {
            continue;
        };
        let row = index.len() as i64;
        let ts = i_time
            .and_then(|i| rec.get(i))
            .and_then(parse_time)
            .or_else(|| fallback_start.map(|s| s + chrono::Duration::days(row)))
            .context("unparseable timestamp")?;
        index.push(ts);
        open.push(o);
        high.push(h);
        low.push(l);
        close.push(c);
        if let Some(i) = i_volume {
            volume.push(num(i).unwrap_or(f64::NAN));
        }
    }

    if index.is_empty() {
        anyhow::bail!("no rows loaded; check headers/delimiter");
    }
    let volume = i_volume.map(|_| volume);
    Ok(OhlcvFrame::new(index, open, high, low, close, volume)?)
}

fn parse_time(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms vs sec
        let secs = if n > 10_i64.pow(12) { n / 1000 } else { n };
        return DateTime::from_timestamp(secs, 0).map(|d| d.naive_utc());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M"]
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%Y/%m/%d"]
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_dates_and_optional_volume() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(f, "Date,Open,High,Low,Close,Volume").unwrap();
        writeln!(f, "2023-01-01,100,103,99,102,1000").unwrap();
        writeln!(f, "2023-01-02,102,106,100,104,1500").unwrap();
        writeln!(f, "bad,row,,,,").unwrap();
        let frame = load_ohlcv_csv(f.path()).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.close().values(), &[102.0, 104.0]);
        assert_eq!(frame.volume().unwrap().values(), &[1000.0, 1500.0]);
        assert_eq!(frame.index()[1].date(), NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    }

    #[test]
    fn missing_close_column_is_an_error() {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(f, "date,open,high,low").unwrap();
        writeln!(f, "2023-01-01,1,2,0").unwrap();
        assert!(load_ohlcv_csv(f.path()).is_err());
    }

    #[test]
    fn epoch_millis_are_seconds() {
        let t = parse_time("1672531200000").unwrap();
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn cli_parses_mav_list() {
        let m = cli().try_get_matches_from(["kbar-demo", "x.csv", "--mav", "5,10", "--no-volume"]).unwrap();
        let mav: Vec<usize> = m.get_many::<usize>("mav").unwrap().copied().collect();
        assert_eq!(mav, vec![5, 10]);
        assert!(m.get_flag("no-volume"));
    }
}
