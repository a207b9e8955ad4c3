use super::{PropagationError, Propagator, TleParseError, TleRecord, hourly_instants};
use chrono::{NaiveDate, Timelike};

const ISS_NAME: &str = "ISS (ZARYA)";
const ISS_LINE1: &str = "1 25544U 98067A   25046.52034722  .00020137  00000+0  35893-3 0  9995";
const ISS_LINE2: &str = "2 25544  51.6390 212.1546 0004103 310.7820  49.2815 15.50193574496813";

fn iss_body() -> String { format!("{ISS_NAME}             \r\n{ISS_LINE1}\r\n{ISS_LINE2}\r\n") }

fn track_date() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 2, 16).unwrap() }

#[test]
fn test_parse_three_line_block() {
    let tle = TleRecord::parse(&iss_body()).unwrap();
    assert_eq!(tle.name(), ISS_NAME);
    assert_eq!(tle.line1(), ISS_LINE1);
    assert_eq!(tle.line2(), ISS_LINE2);
}

#[test]
fn test_parse_ignores_blank_and_extra_lines() {
    let body = format!("\n{ISS_NAME}\n\n{ISS_LINE1}\n{ISS_LINE2}\nSOMETHING ELSE\n");
    let tle = TleRecord::parse(&body).unwrap();
    assert_eq!(tle.line1(), ISS_LINE1);
    assert_eq!(tle.line2(), ISS_LINE2);
}

#[test]
fn test_parse_too_few_lines() {
    let body = format!("{ISS_NAME}\n{ISS_LINE1}\n");
    assert_eq!(TleRecord::parse(&body), Err(TleParseError::TooFewLines(2)));
    assert_eq!(TleRecord::parse(""), Err(TleParseError::TooFewLines(0)));
}

#[test]
fn test_parse_no_data() {
    assert_eq!(TleRecord::parse("No GP data found\n"), Err(TleParseError::NoData));
}

#[test]
fn test_parse_malformed_lines() {
    let swapped = format!("{ISS_NAME}\n{ISS_LINE2}\n{ISS_LINE1}\n");
    assert_eq!(TleRecord::parse(&swapped), Err(TleParseError::MalformedLine(1)));
    let truncated = format!("{ISS_NAME}\n{ISS_LINE1}\n{}\n", &ISS_LINE2[..60]);
    assert_eq!(TleRecord::parse(&truncated), Err(TleParseError::MalformedLine(2)));
}

#[test]
fn test_hourly_instants() {
    let instants = hourly_instants(track_date(), 24);
    assert_eq!(instants.len(), 24);
    for (h, instant) in instants.iter().enumerate() {
        assert_eq!(instant.date_naive(), track_date());
        assert_eq!(instant.hour() as usize, h);
        assert_eq!(instant.minute(), 0);
    }
}

#[test]
fn test_ground_track_order_and_ranges() {
    let tle = TleRecord::parse(&iss_body()).unwrap();
    let propagator = Propagator::new(&tle).unwrap();
    let instants = hourly_instants(track_date(), 24);
    let track = propagator.ground_track(&instants).unwrap();

    assert_eq!(track.len(), 24);
    for (sample, instant) in track.iter().zip(&instants) {
        assert_eq!(sample.timestamp, *instant);
        assert!((-90.0..=90.0).contains(&sample.latitude), "{sample}");
        assert!((-180.0..=180.0).contains(&sample.longitude), "{sample}");
        // ISS inclination bounds the latitude
        assert!(sample.latitude.abs() < 52.5, "{sample}");
        assert!((350.0..480.0).contains(&sample.altitude), "{sample}");
    }
}

#[test]
fn test_ground_track_empty_instants() {
    let tle = TleRecord::parse(&iss_body()).unwrap();
    let propagator = Propagator::new(&tle).unwrap();
    assert!(propagator.ground_track(&[]).unwrap().is_empty());
}

#[test]
fn test_bad_checksum_rejected() {
    let bad_line1 = format!("{}8", &ISS_LINE1[..68]);
    let body = format!("{ISS_NAME}\n{bad_line1}\n{ISS_LINE2}\n");
    let tle = TleRecord::parse(&body).unwrap();
    assert!(matches!(Propagator::new(&tle), Err(PropagationError::InvalidElements(_))));
}

#[test]
fn test_epoch() {
    let tle = TleRecord::parse(&iss_body()).unwrap();
    let propagator = Propagator::new(&tle).unwrap();
    let epoch = propagator.epoch();
    assert_eq!(epoch.date_naive(), NaiveDate::from_ymd_opt(2025, 2, 15).unwrap());
    assert_eq!(epoch.hour(), 12);
}
