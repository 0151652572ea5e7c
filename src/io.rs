//! CSV reading and writing for the command-line tool.
//!
//! Input files have a `time` column followed by one column per channel.

use std::path::Path;

use anyhow::{Context, Result, bail};
use ndarray::Array2;
use tempo_series::{ComplexTimeSeries, TimeSeries};
use tempo_wavelet::CwtResult;

/// Reads a `time,<channel>...` CSV into a validated series.
pub fn read_series(path: &Path) -> Result<TimeSeries> {
    let mut rdr = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = rdr.headers().context("reading CSV header")?.clone();

    match headers.get(0) {
        Some(h) if h.trim().eq_ignore_ascii_case("time") => {}
        other => bail!("first CSV column must be `time`, found {other:?}"),
    }
    let names: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();
    if names.is_empty() {
        bail!("CSV has no channel columns after `time`");
    }

    let mut times = Vec::new();
    let mut values = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let row = i + 2;
        let rec = rec.with_context(|| format!("reading CSV row {row}"))?;
        if rec.len() != headers.len() {
            bail!(
                "row {row}: expected {} fields, found {}",
                headers.len(),
                rec.len()
            );
        }
        for (j, (field, name)) in rec.iter().zip(headers.iter()).enumerate() {
            let v: f64 = field
                .trim()
                .parse()
                .with_context(|| format!("row {row}: parsing {name} value {field:?}"))?;
            if j == 0 {
                times.push(v);
            } else {
                values.push(v);
            }
        }
    }

    let samples = Array2::from_shape_vec((times.len(), names.len()), values)
        .context("assembling sample matrix")?;
    TimeSeries::new(samples, times, names)
        .with_context(|| format!("invalid time series in {}", path.display()))
}

/// Writes a real series as `time,<channel>...`.
pub fn write_series(path: &Path, series: &TimeSeries) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("creating CSV")?;
    let mut header = vec!["time".to_string()];
    header.extend(series.channel_names().iter().cloned());
    wtr.write_record(&header)?;

    for (t, row) in series.time_span().iter().zip(series.samples().rows()) {
        let mut record = vec![t.to_string()];
        record.extend(row.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// Writes a complex series as `time,<channel>_re,<channel>_im,...`.
pub fn write_analytic(path: &Path, series: &ComplexTimeSeries) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("creating CSV")?;
    let mut header = vec!["time".to_string()];
    for name in series.channel_names() {
        header.push(format!("{name}_re"));
        header.push(format!("{name}_im"));
    }
    wtr.write_record(&header)?;

    for (t, row) in series.time_span().iter().zip(series.samples().rows()) {
        let mut record = vec![t.to_string()];
        for z in row {
            record.push(z.re.to_string());
            record.push(z.im.to_string());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// Writes CWT coefficients in long format:
/// `time,freq_hz,channel,re,im,power`, one row per coefficient.
pub fn write_cwt(path: &Path, result: &CwtResult) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("creating CSV")?;
    wtr.write_record(["time", "freq_hz", "channel", "re", "im", "power"])?;

    let coefficients = result.coefficients();
    for (ti, t) in result.time_span().iter().enumerate() {
        for (fi, f) in result.freqs().iter().enumerate() {
            for (ci, name) in result.channel_names().iter().enumerate() {
                let z = coefficients[[ti, fi, ci]];
                wtr.write_record([
                    t.to_string(),
                    f.to_string(),
                    name.clone(),
                    z.re.to_string(),
                    z.im.to_string(),
                    z.norm_sqr().to_string(),
                ])?;
            }
        }
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}
