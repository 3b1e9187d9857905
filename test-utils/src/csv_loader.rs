use std::error::Error;
use std::path::Path;

use csv::Reader;
use num_enum::TryFromPrimitive;

/// Column layout of recorded sensor files.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, TryFromPrimitive)]
pub enum CsvFileColumn {
    Timestamp,
    XGyro,
    YGyro,
    ZGyro,
    XAccel,
    YAccel,
    ZAccel,
    XMag,
    YMag,
    ZMag,
}

impl From<CsvFileColumn> for usize {
    fn from(value: CsvFileColumn) -> Self {
        value as usize
    }
}

fn column_name(index: usize) -> String {
    match CsvFileColumn::try_from_primitive(index) {
        Ok(column) => format!("{:?}", column),
        Err(_) => format!("#{}", index),
    }
}

/// Builds the list of column indices to read, in the order they are added.
#[derive(Clone, Debug, Default)]
pub struct CsvColumnMapper {
    columns: Vec<usize>,
}

impl CsvColumnMapper {
    pub fn new() -> Self {
        Self { columns: vec![] }
    }

    pub fn columns(&self) -> Vec<usize> {
        self.columns.clone()
    }

    pub fn add_timestamp(&mut self) -> &mut Self {
        self.add(&[CsvFileColumn::Timestamp])
    }

    pub fn add_gyro(&mut self) -> &mut Self {
        self.add(&[
            CsvFileColumn::XGyro,
            CsvFileColumn::YGyro,
            CsvFileColumn::ZGyro,
        ])
    }

    pub fn add_accel(&mut self) -> &mut Self {
        self.add(&[
            CsvFileColumn::XAccel,
            CsvFileColumn::YAccel,
            CsvFileColumn::ZAccel,
        ])
    }

    pub fn add_mag(&mut self) -> &mut Self {
        self.add(&[
            CsvFileColumn::XMag,
            CsvFileColumn::YMag,
            CsvFileColumn::ZMag,
        ])
    }

    fn add(&mut self, columns: &[CsvFileColumn]) -> &mut Self {
        self.columns.extend(columns.iter().copied().map(usize::from));
        self
    }
}

/// Reads every record of a CSV file with a header row. Fields that are not
/// numbers are skipped.
pub fn load_csv(file_path: impl AsRef<Path>) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Vec<f64> = record
            .iter()
            .filter_map(|s| s.trim().parse::<f64>().ok())
            .collect();
        data.push(row);
    }

    Ok(data)
}

/// Reads the given `columns` of every record and converts each row into a `T`.
pub fn load_csv_columns<T: TryFrom<Vec<f64>>>(
    file_path: impl AsRef<Path>,
    columns: &[usize],
) -> Result<Vec<T>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    let data = load_csv(file_path)?;
    if data.is_empty() {
        return Err("No records found".into());
    }

    data.into_iter()
        .map(|row| -> Result<T, Box<dyn Error>> {
            let values = columns
                .iter()
                .map(|&i| {
                    row.get(i)
                        .copied()
                        .ok_or_else(|| format!("Column {} out of bounds", column_name(i)))
                })
                .collect::<Result<Vec<f64>, String>>()?;
            T::try_from(values).map_err(|_| "Failed to convert row".into())
        })
        .collect()
}
