use chrono::TimeZone;
use vivino_core::{Destination, WineRecord};
use vivino_scraper::{RunOutcome, RunReport, RunStatus};

use super::*;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["vivino-cli"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("expected valid cli args")
}

#[test]
fn name_is_required() {
    let err = Cli::try_parse_from(["vivino-cli"]).unwrap_err();
    assert_eq!(
        err.kind(),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn defaults_to_us_california() {
    let cli = parse(&["--name", "malbec"]);
    assert_eq!(cli.destination(), Destination::new("US", "CA"));
    assert!(cli.bounds().is_empty());
    assert!(cli.output_dir.is_none());
}

#[test]
fn non_us_country_has_no_default_state() {
    let cli = parse(&["--name", "malbec", "--country", "FR"]);
    assert_eq!(cli.destination(), Destination::new("FR", ""));
}

#[test]
fn explicit_state_is_kept() {
    let cli = parse(&["--name", "malbec", "--state", "NY"]);
    assert_eq!(cli.destination(), Destination::new("US", "NY"));
}

#[test]
fn filter_flags_map_to_bounds() {
    let cli = parse(&[
        "--name",
        "malbec",
        "--min-price",
        "10",
        "--max-price",
        "40.5",
        "--min-ratings",
        "0",
        "--max-average",
        "4.2",
        "--no-price-included",
    ]);
    let bounds = cli.bounds();
    assert_eq!(bounds.min_price, Some(10.0));
    assert_eq!(bounds.max_price, Some(40.5));
    assert_eq!(bounds.min_ratings, Some(0.0));
    assert_eq!(bounds.max_ratings, None);
    assert_eq!(bounds.min_average, None);
    assert_eq!(bounds.max_average, Some(4.2));
    assert!(bounds.include_unpriced);
}

#[test]
fn non_numeric_bound_is_rejected() {
    assert!(Cli::try_parse_from(["vivino-cli", "--name", "x", "--min-price", "cheap"]).is_err());
}

#[test]
fn blank_name_fails_request_validation() {
    let cli = parse(&["--name", "   "]);
    assert!(matches!(
        cli.search_request(),
        Err(vivino_core::CoreError::EmptyQuery)
    ));
}

#[test]
fn negative_bound_fails_request_validation() {
    let cli = parse(&["--name", "malbec", "--max-price=-1"]);
    assert!(matches!(
        cli.search_request(),
        Err(vivino_core::CoreError::InvalidBound { name: "max_price", .. })
    ));
}

#[test]
fn output_dir_flag_is_parsed() {
    let cli = parse(&["--name", "malbec", "--output-dir", "/tmp/out"]);
    assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
}

// ---------------------------------------------------------------------------
// Report persistence
// ---------------------------------------------------------------------------

fn fixed_instant() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc
        .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
        .unwrap()
        + chrono::Duration::milliseconds(42)
}

#[test]
fn report_filename_replaces_separators() {
    assert_eq!(
        report::report_filename(fixed_instant()),
        "vivino-output-2024-03-09T14-05-07-042Z.json"
    );
}

#[test]
fn write_report_persists_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let report = RunOutcome::HttpError {
        records: vec![WineRecord {
            name: Some("Malbec".to_owned()),
            price: Some(12.5),
            ratings: 40,
            ..WineRecord::default()
        }],
        http_status: 503,
        page_index: 2,
    }
    .into_report();

    let path = report::write_report(dir.path(), &report, fixed_instant()).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("vivino-output-2024-03-09T14-05-07-042Z.json")
    );

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains('\n'), "expected pretty-printed JSON");
    let parsed: RunReport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, report);
    assert_eq!(parsed.status, RunStatus::HttpError);
    assert_eq!(parsed.http_status, Some(503));
    assert_eq!(parsed.page_index, Some(2));
}

#[test]
fn write_report_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let report = RunOutcome::Done {
        records: Vec::new(),
    }
    .into_report();

    let err = report::write_report(&missing, &report, fixed_instant()).unwrap_err();
    assert!(err.to_string().contains("failed to write report"));
}
