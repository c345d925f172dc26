use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayerWeightsError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid layer weight on line {line}: '{value}'")]
    Format { line: u64, value: String },
}

/// Reads a per-energy-layer weight file.
///
/// The file holds one number per line. Blank lines and lines starting with
/// `#` are skipped; when a line has several comma-separated columns only the
/// first one is used.
pub fn read_layer_weights(path: &Path) -> Result<Vec<f64>, LayerWeightsError> {
    let path_str = path.to_string_lossy().to_string();
    let reader = reader_builder()
        .from_path(path)
        .map_err(|e| LayerWeightsError::Csv {
            path: path_str.clone(),
            source: e,
        })?;
    parse_records(reader, &path_str)
}

/// Reads per-energy-layer weights from any byte source.
pub fn read_layer_weights_from(source: impl io::Read) -> Result<Vec<f64>, LayerWeightsError> {
    parse_records(reader_builder().from_reader(source), "<reader>")
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All);
    builder
}

fn parse_records<R: io::Read>(
    mut reader: csv::Reader<R>,
    path: &str,
) -> Result<Vec<f64>, LayerWeightsError> {
    let mut weights = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LayerWeightsError::Csv {
            path: path.to_string(),
            source: e,
        })?;
        let line = record.position().map_or(0, |p| p.line());
        let Some(field) = record.get(0).filter(|f| !f.is_empty()) else {
            continue;
        };
        let weight = field.parse::<f64>().map_err(|_| LayerWeightsError::Format {
            line,
            value: field.to_string(),
        })?;
        weights.push(weight);
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn reads_one_weight_per_line() {
        let weights = read_layer_weights_from("1.0\n0.5\n2\n".as_bytes()).unwrap();
        assert_eq!(weights, vec![1.0, 0.5, 2.0]);
    }

    #[test]
    fn uses_first_column_and_skips_blank_and_comment_lines() {
        let source = "# layer weights\n1.5, ignored\n\n0.25,x,y\n";
        let weights = read_layer_weights_from(source.as_bytes()).unwrap();
        assert_eq!(weights, vec![1.5, 0.25]);
    }

    #[test]
    fn unparseable_entry_reports_line_and_value() {
        let result = read_layer_weights_from("1.0\nabc\n".as_bytes());
        match result {
            Err(LayerWeightsError::Format { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn empty_source_yields_no_weights() {
        let weights = read_layer_weights_from("".as_bytes()).unwrap();
        assert!(weights.is_empty());
    }

    #[test]
    fn read_layer_weights_succeeds_with_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("weights.csv");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "0.9").unwrap();
        writeln!(file, "1.1").unwrap();

        let weights = read_layer_weights(&file_path).unwrap();
        assert_eq!(weights, vec![0.9, 1.1]);
    }

    #[test]
    fn read_layer_weights_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_layer_weights(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(LayerWeightsError::Csv { .. })));
    }
}
