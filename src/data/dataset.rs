use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{
    error::{DatasetErr, Result},
    schema::FeatureSchema,
};

/// An in-memory labelled dataset.
///
/// Records are stored row-major, one row per sample, with columns in the
/// order of the schema the dataset was loaded with.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Array2<f64>,
    labels: Array1<usize>,
}

impl Dataset {
    /// Creates a new dataset from owned buffers.
    ///
    /// # Panics
    /// - if `records.nrows() != labels.len()`
    pub fn new(records: Array2<f64>, labels: Array1<usize>) -> Self {
        assert_eq!(
            records.nrows(),
            labels.len(),
            "records and labels must have same length"
        );
        Self { records, labels }
    }

    /// Reads the training file at `path`, keeping only the schema's columns
    /// and the `label` column.
    ///
    /// # Errors
    /// Returns `DatasetErr` if the file can't be read or any selected cell is
    /// absent or not numeric.
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        schema: &FeatureSchema,
        label: &str,
    ) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!("reading dataset from {}", path.as_ref().display());
        Self::from_csv_reader(BufReader::new(file), schema, label)
    }

    pub fn from_csv_str(content: &str, schema: &FeatureSchema, label: &str) -> Result<Self> {
        Self::from_csv_reader(Cursor::new(content), schema, label)
    }

    /// Parses comma separated rows. The first non-empty line is the header and
    /// columns are located by exact name, so extra columns are ignored.
    pub fn from_csv_reader<R: BufRead>(
        reader: R,
        schema: &FeatureSchema,
        label: &str,
    ) -> Result<Self> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, line)| line.map(|l| (i + 1, l)));

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let (_, line) = line?;
                    let line = line.trim_start_matches('\u{feff}');
                    if !line.trim().is_empty() {
                        break split_row(line)
                            .into_iter()
                            .map(str::to_string)
                            .collect::<Vec<_>>();
                    }
                }
                None => return Err(DatasetErr::MissingHeader),
            }
        };

        let column_of = |name: &str| {
            header
                .iter()
                .position(|h| h.as_str() == name)
                .ok_or_else(|| DatasetErr::MissingColumn(name.to_string()))
        };

        let feature_cols = schema
            .names()
            .map(|name| column_of(name))
            .collect::<Result<Vec<_>>>()?;
        let label_col = column_of(label)?;

        let mut data = Vec::new();
        let mut labels = Vec::new();

        for line in lines {
            let (line_no, line) = line?;
            if line.trim().is_empty() {
                continue;
            }

            let cells = split_row(&line);
            if cells.len() != header.len() {
                return Err(DatasetErr::RowLength {
                    line: line_no,
                    got: cells.len(),
                    expected: header.len(),
                });
            }

            let parse = |col: usize| {
                cells[col]
                    .parse::<f64>()
                    .map_err(|_| DatasetErr::NotNumeric {
                        line: line_no,
                        column: header[col].to_string(),
                        value: cells[col].to_string(),
                    })
            };

            for &col in &feature_cols {
                data.push(parse(col)?);
            }

            let value = parse(label_col)?;
            let label = if value == 0.0 {
                0
            } else if value == 1.0 {
                1
            } else {
                return Err(DatasetErr::InvalidLabel {
                    line: line_no,
                    value,
                });
            };
            labels.push(label);
        }

        if labels.is_empty() {
            return Err(DatasetErr::Empty);
        }

        let records = Array2::from_shape_vec((labels.len(), feature_cols.len()), data)
            .map_err(|_| DatasetErr::Empty)?;

        Ok(Self::new(records, Array1::from_vec(labels)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.records.ncols()
    }

    #[inline]
    pub fn records(&self) -> ArrayView2<'_, f64> {
        self.records.view()
    }

    #[inline]
    pub fn labels(&self) -> ArrayView1<'_, usize> {
        self.labels.view()
    }

    /// Number of distinct label values, assuming labels are `0..n`.
    pub fn n_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |max| max + 1)
    }

    /// How many samples carry each label, indexed by label.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes()];
        for &label in &self.labels {
            counts[label] += 1;
        }
        counts
    }

    /// Builds a new dataset out of the rows at `indices`, in that order.
    /// Indices may repeat.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            records: self.records.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
        }
    }

    /// Shuffles the rows with a generator seeded by `seed` and cuts them in
    /// two: the first `floor(len * train_ratio)` rows for training and the
    /// remainder held out.
    ///
    /// # Errors
    /// Returns `DatasetErr::EmptySplit` if either side would be empty.
    pub fn split(&self, train_ratio: f64, seed: u64) -> Result<(Self, Self)> {
        let len = self.len();
        let n_train = (len as f64 * train_ratio).floor() as usize;
        if !(0.0..=1.0).contains(&train_ratio) || n_train == 0 || n_train >= len {
            return Err(DatasetErr::EmptySplit {
                len,
                ratio: train_ratio,
            });
        }

        let mut indices: Vec<usize> = (0..len).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (train, test) = indices.split_at(n_train);
        Ok((self.select(train), self.select(test)))
    }
}

fn split_row(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|cell| cell.trim().trim_matches('"'))
        .collect()
}
