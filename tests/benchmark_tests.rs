use crimesort::bench::InputShape;
use crimesort::prelude::*;
use crimesort::{BenchmarkReport, Error};
use std::collections::HashSet;

fn records() -> Vec<Record> {
    let regions = ["Seoul", "Busan", "Daegu", "Incheon", "Gwangju", "Daejeon", "Ulsan"];
    let categories = ["Theft", "Fraud", "Assault"];
    let mut out = Vec::new();
    for (i, region) in regions.iter().enumerate() {
        for (j, category) in categories.iter().enumerate() {
            out.push(Record::crime(*region, *category, (i as i64 * 13 + j as i64 * 7) % 50 + 1));
        }
    }
    out
}

#[test]
fn test_sixteen_lines() {
    let lines = run_benchmark(&records()).unwrap();
    assert_eq!(lines.len(), 16);
    for line in &lines {
        assert!(line.contains(" sorting "), "{line}");
        assert!(line.ends_with(" seconds"), "{line}");
    }
}

#[test]
fn test_line_format() {
    let report = Benchmark::default().run(&records()).unwrap();
    let sample = report
        .samples()
        .iter()
        .find(|s| {
            s.algorithm == Algorithm::Bubble
                && s.shape == InputShape::Labels
                && s.direction == Direction::Descending
        })
        .unwrap();
    let line = sample.line();
    assert!(
        line.starts_with("Bubble Sort sorting region labels (7 items) in descending order: "),
        "{line}"
    );
    let seconds: f64 = line
        .rsplit(": ")
        .next()
        .unwrap()
        .trim_end_matches(" seconds")
        .parse()
        .unwrap();
    assert!(seconds >= 0.0);
}

#[test]
fn test_every_combination_once_fastest_first() {
    let report: BenchmarkReport = Benchmark::default().run(&records()).unwrap();
    let samples = report.samples();
    assert_eq!(samples.len(), 16);

    let combos: HashSet<_> = samples
        .iter()
        .map(|s| (s.algorithm, s.shape, s.direction))
        .collect();
    assert_eq!(combos.len(), 16);

    for pair in samples.windows(2) {
        assert!(pair[0].elapsed <= pair[1].elapsed);
    }
    assert_eq!(report.fastest(), samples.first());
    assert_eq!(report.slowest(), samples.last());

    let aggregated = samples
        .iter()
        .find(|s| s.shape == InputShape::Aggregated)
        .unwrap();
    assert_eq!(aggregated.items, 7);
}

#[test]
fn test_custom_config() {
    let config = BenchmarkConfig::from_json(
        r#"{"label_field": "category", "algorithms": ["insertion", {"quick": "median_of_three"}]}"#,
    )
    .unwrap();
    assert_eq!(config.count_field, "count");

    let report = Benchmark::new(config).run(&records()).unwrap();
    assert_eq!(report.samples().len(), 8);
    assert!(report.lines().iter().any(|l| l.contains("category labels (3 items)")));

    let json = report.to_json().unwrap();
    assert!(json.contains("\"median_of_three\""));
}

#[test]
fn test_empty_records_still_report_every_combination() {
    let lines = run_benchmark(&[]).unwrap();
    assert_eq!(lines.len(), 16);
}

#[test]
fn test_records_without_label_field() {
    let records = vec![Record::new().with("count", 3)];
    assert!(matches!(
        run_benchmark(&records),
        Err(Error::IncomparableKey { .. })
    ));
}
