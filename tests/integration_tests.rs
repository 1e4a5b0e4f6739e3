use aqs_zip_matcher::error::ProcessingError;
use aqs_zip_matcher::matching::assign_nearest_centroids;
use aqs_zip_matcher::utils::haversine_miles;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

const MONITORS: &str = "\
Date,Source,Site ID,POC,Daily Mean PM2.5 Concentration,Local Site Name,AQS Parameter Description,Site Latitude,Site Longitude
01/01/2016,AQS,420030008,1,10.2,Lawrenceville,PM2.5 - Local Conditions,40.465420,-79.960757
01/01/2016,AQS,420031301,1,12.8,North Braddock,PM2.5 - Local Conditions,40.402328,-79.860973
01/02/2016,AQS,420030008,1,8.4,Lawrenceville,PM2.5 - Local Conditions,40.465420,-79.960757
01/01/2016,AQS,420030008,1,0.031,Lawrenceville,Ozone,40.465420,-79.960757
";

const CENTROIDS: &str = "\
ZIP Code,Latitude,Longitude
15201,40.4900,-79.9500
15213,40.4440,-79.9530
15104,40.4040,-79.8620
";

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).expect("open output");
    let mut rows = vec![reader
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect()];
    for record in reader.records() {
        rows.push(record.expect("record").iter().map(str::to_string).collect());
    }
    rows
}

#[test]
fn test_end_to_end_matching() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let centroids = write(&dir, "centroids.csv", CENTROIDS);
    let monitors = write(&dir, "monitors.csv", MONITORS);
    let output = dir.path().join("matched.csv");

    let stats = assign_nearest_centroids(&centroids, &monitors, &output, true).unwrap();

    assert_eq!(stats.total_rows, 4);
    assert_eq!(stats.searches, 3);
    assert_eq!(stats.cache_hits, 1);
    assert_eq!(stats.unmatched_rows, 0);

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 5);
    assert_eq!(
        &rows[0][9..],
        &["Centroid_Zipcode", "Centroid_Lat", "Centroid_Long", "Distance_to_Centroid"]
    );

    // Original columns pass through verbatim, in order
    assert_eq!(&rows[1][..9], &MONITORS.lines().nth(1).unwrap().split(',').collect::<Vec<_>>()[..]);

    let zips: Vec<&str> = rows[1..].iter().map(|r| r[9].as_str()).collect();
    assert_eq!(zips, vec!["15213", "15104", "15213", "15213"]);

    // Repeated site/parameter rows carry identical match output
    assert_eq!(rows[1][9..], rows[3][9..]);

    let distance: f64 = rows[2][12].parse().unwrap();
    let expected = haversine_miles(40.402328, -79.860973, 40.4040, -79.8620);
    assert_eq!(distance, expected);
}

#[test]
fn test_pittsburgh_example() {
    let dir = TempDir::new().unwrap();
    let centroids = write(
        &dir,
        "centroids.csv",
        "ZIP Code,Latitude,Longitude\n15201,40.4900,-79.9500\n15213,40.4440,-79.9530\n",
    );
    let monitors = write(
        &dir,
        "monitors.csv",
        "Site ID,Local Site Name,AQS Parameter Description,Site Latitude,Site Longitude\n\
         1,Oakland,Ozone,40.4450,-79.9520\n",
    );
    let output = dir.path().join("matched.csv");

    assign_nearest_centroids(&centroids, &monitors, &output, true).unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows[1][5], "15213");
    assert_eq!(rows[1][6], "40.444");
    assert_eq!(rows[1][7], "-79.953");
    let distance: f64 = rows[1][8].parse().unwrap();
    assert!(distance < 0.1);
    assert!(haversine_miles(40.4450, -79.9520, 40.4900, -79.9500) > 3.0);
}

#[test]
fn test_empty_centroid_table_completes() {
    let dir = TempDir::new().unwrap();
    let centroids = write(&dir, "centroids.csv", "ZIP Code,Latitude,Longitude\n");
    let monitors = write(&dir, "monitors.csv", MONITORS);
    let output = dir.path().join("matched.csv");

    let stats = assign_nearest_centroids(&centroids, &monitors, &output, true).unwrap();

    assert_eq!(stats.unmatched_rows, 4);
    for row in &read_rows(&output)[1..] {
        assert_eq!(&row[9..], &["", "", "", "inf"]);
    }
}

#[test]
fn test_missing_column_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let centroids = write(&dir, "centroids.csv", "ZIP Code,Latitude\n15201,40.49\n");
    let monitors = write(&dir, "monitors.csv", MONITORS);
    let output = dir.path().join("matched.csv");

    let err = assign_nearest_centroids(&centroids, &monitors, &output, true).unwrap_err();

    match err {
        ProcessingError::MissingColumns { columns, .. } => assert_eq!(columns, vec!["Longitude"]),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_missing_monitor_column_keeps_previous_output() {
    let dir = TempDir::new().unwrap();
    let centroids = write(&dir, "centroids.csv", CENTROIDS);
    let monitors = write(
        &dir,
        "monitors.csv",
        "Site ID,Site Latitude,Site Longitude\n1,40.0,-80.0\n",
    );
    let output = write(&dir, "matched.csv", "previous run\n");

    let result = assign_nearest_centroids(&centroids, &monitors, &output, true);

    assert!(matches!(result, Err(ProcessingError::MissingColumns { .. })));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous run\n");
}
