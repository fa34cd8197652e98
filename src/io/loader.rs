//! CSV loading.
//!
//! Reads the daily rental file fully into memory. The schema is strict for the
//! columns we aggregate on and permissive for everything else:
//! - required columns must exist (checked before any row is read)
//! - any malformed row aborts the load; there is no partial dataset
//! - unknown columns are carried through as text in `RentalRecord::extras`

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;

use crate::domain::RentalRecord;
use crate::error::{AppError, DataError};

const COL_DATE: &str = "dteday";
const COL_SEASON: &str = "season";
const COL_WEATHER: &str = "weathersit";
const COL_WEEKDAY: &str = "weekday";
const COL_COUNT: &str = "cnt";

const REQUIRED_COLUMNS: [&str; 5] = [COL_DATE, COL_SEASON, COL_WEATHER, COL_WEEKDAY, COL_COUNT];

/// Load every record from the CSV file at `path`.
pub fn load_records(path: &Path) -> Result<Vec<RentalRecord>, AppError> {
    let file = File::open(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = load_records_from_reader(file)?;
    log::info!("loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Load every record from an arbitrary reader (same contract as [`load_records`]).
pub fn load_records_from_reader<R: Read>(reader: R) -> Result<Vec<RentalRecord>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| DataError::Csv { line: 1, source })?
        .clone();

    let header_map = build_header_map(&headers);
    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(DataError::MissingColumn(column));
        }
    }

    let extra_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (idx, normalize_header_name(name)))
        .filter(|(_, name)| !REQUIRED_COLUMNS.contains(&name.as_str()))
        .collect();

    let mut out = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Quoted fields can span lines; the reader's position has the real line.
        let fallback = idx + 2;
        let record = result.map_err(|source| {
            let line = source.position().map_or(fallback, |pos| pos.line() as usize);
            DataError::Csv { line, source }
        })?;
        let line = record.position().map_or(fallback, |pos| pos.line() as usize);
        out.push(parse_row(&record, &header_map, &extra_columns, line)?);
    }

    if out.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    extra_columns: &[(usize, String)],
    line: usize,
) -> Result<RentalRecord, DataError> {
    let dteday = get_required(record, header_map, COL_DATE, line)?.to_string();
    let season = parse_int(record, header_map, COL_SEASON, line)?;
    let weathersit = parse_int(record, header_map, COL_WEATHER, line)?;
    let weekday = parse_int(record, header_map, COL_WEEKDAY, line)?;
    let cnt = parse_int(record, header_map, COL_COUNT, line)?;

    let extras = extra_columns
        .iter()
        .map(|(idx, name)| (name.clone(), record.get(*idx).unwrap_or("").to_string()))
        .collect();

    Ok(RentalRecord {
        dteday,
        season,
        weathersit,
        weekday,
        cnt,
        extras,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    column: &'static str,
    line: usize,
) -> Result<&'a str, DataError> {
    let idx = header_map
        .get(column)
        .ok_or(DataError::MissingColumn(column))?;
    record
        .get(*idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DataError::InvalidValue {
            line,
            column,
            value: String::new(),
        })
}

fn parse_int<T: FromStr>(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: &'static str,
    line: usize,
) -> Result<T, DataError> {
    let raw = get_required(record, header_map, column, line)?;
    raw.parse::<T>().map_err(|_| DataError::InvalidValue {
        line,
        column,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,casual,registered,cnt
1,2011-01-01,1,0,1,0,6,0,2,0.344167,331,654,985
2,2011-01-02,1,0,1,0,0,0,2,0.363478,131,670,801
";

    #[test]
    fn loads_required_columns_and_keeps_extras() {
        let records = load_records_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.dteday, "2011-01-01");
        assert_eq!(first.season, 1);
        assert_eq!(first.weathersit, 2);
        assert_eq!(first.weekday, 6);
        assert_eq!(first.cnt, 985);

        let extra_names: Vec<&str> = first.extras.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            extra_names,
            vec!["instant", "yr", "mnth", "holiday", "workingday", "temp", "casual", "registered"]
        );
        assert_eq!(first.extras[6], ("casual".to_string(), "331".to_string()));
    }

    #[test]
    fn header_matching_ignores_case_and_bom() {
        let csv = "\u{feff}DTEDAY,Season,WeatherSit,Weekday,CNT\n2011-03-05, 1 ,1,6, 42\n";
        let records = load_records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records[0].dteday, "2011-03-05");
        assert_eq!(records[0].cnt, 42);
        assert!(records[0].extras.is_empty());
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "dteday,season,weathersit,weekday\n2011-01-01,1,1,6\n";
        let err = load_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("cnt")));
    }

    #[test]
    fn malformed_count_aborts_whole_load() {
        let csv = "dteday,season,weathersit,weekday,cnt\n2011-01-01,1,1,6,10\n2011-01-02,1,1,0,-5\n";
        let err = load_records_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataError::InvalidValue { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "cnt");
                assert_eq!(value, "-5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_codes_load_as_unlabeled() {
        let csv = "dteday,season,weathersit,weekday,cnt\n2011-01-01,-1,300,9,10\n";
        let records = load_records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!((records[0].season, records[0].weathersit, records[0].weekday), (-1, 300, 9));

        let enriched = crate::enrich::enrich(records).unwrap();
        assert_eq!(enriched[0].season(), None);
        assert_eq!(enriched[0].weather(), None);
        assert_eq!(enriched[0].day_type(), crate::domain::DayType::Weekend);
    }

    #[test]
    fn error_line_accounts_for_multiline_fields() {
        let csv = "dteday,season,weathersit,weekday,cnt,note\n\
2011-01-01,1,1,6,10,\"two\nlines\"\n\
2011-01-02,1,1,0,oops,x\n";
        let err = load_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { line: 4, column: "cnt", .. }), "{err}");
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let csv = "dteday,season,weathersit,weekday,cnt\n2011-01-01,1,1\n";
        let err = load_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv { line: 2, .. }));
    }

    #[test]
    fn header_only_file_is_empty_error() {
        let csv = "dteday,season,weathersit,weekday,cnt\n";
        let err = load_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Empty));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_records(Path::new("definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.to_string().contains("definitely/not/here.csv"));
    }
}
