//! Command-line edge: load a catalog dump and a request, run validation and
//! the search, print the outcome as JSON.

use std::fs;

use anyhow::{bail, Context, Result};

use jadawil::{RawSection, ScheduleRequest, Scheduler};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [catalog_path, request_path] = args.as_slice() else {
        bail!(
            "usage: jadawil <catalog.json> <request.json>\n\
             catalog.json: array of section records for the term\n\
             request.json: {{\"courses\": [..], \"pins\": [..], \"filter\": {{\"track\": \"B\"}}}}"
        );
    };

    let catalog = fs::read_to_string(catalog_path)
        .with_context(|| format!("reading catalog {catalog_path}"))?;
    let records: Vec<RawSection> =
        serde_json::from_str(&catalog).context("catalog is not an array of section records")?;

    let request_text = fs::read_to_string(request_path)
        .with_context(|| format!("reading request {request_path}"))?;
    let request: ScheduleRequest =
        serde_json::from_str(&request_text).context("request is not valid")?;

    let report = jadawil::validate(&records, &request.courses, &request.pins);
    if !report.is_clean() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        bail!("request references unknown courses or CRNs");
    }

    let outcome = Scheduler::new().search(&records, &request)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
