//! Pedigree tables in comma-separated form.
//!
//! Columns are located by header name: `ID` is required, `father`, `mother`,
//! `YOB`, `gender` and `live` are optional, anything else is ignored. Empty
//! fields are missing values.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::debug;

use crate::error::{PedigreeError, Result};

const HEADER: [&str; 6] = ["ID", "father", "mother", "YOB", "gender", "live"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PedigreeRecord {
    pub id: String,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub birth_year: Option<i32>,
    /// 1 = male, 2 = female.
    pub gender: Option<u8>,
    pub live: Option<bool>,
}

impl PedigreeRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Pedigree {
    pub records: Vec<PedigreeRecord>,
    /// Whether liveness is known, either from a `live` column or from
    /// [`Pedigree::mark_live`].
    pub has_live: bool,
}

struct Columns {
    id: usize,
    father: Option<usize>,
    mother: Option<usize>,
    birth_year: Option<usize>,
    gender: Option<usize>,
    live: Option<usize>,
    width: usize,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h == name);
        Ok(Self {
            id: find("ID").ok_or(PedigreeError::MissingColumn("ID"))?,
            father: find("father"),
            mother: find("mother"),
            birth_year: find("YOB"),
            gender: find("gender"),
            live: find("live"),
            width: header.len(),
        })
    }
}

impl Pedigree {
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::parse(file)
    }

    pub fn parse(reader: impl Read) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let columns = Columns::from_header(rdr.headers()?)?;

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let line = row.position().map_or(0, |p| p.line() as usize);
            if row.len() != columns.width {
                return Err(PedigreeError::Malformed {
                    line,
                    message: format!("expected {} fields, found {}", columns.width, row.len()),
                });
            }
            let get = |col: Option<usize>| col.and_then(|c| row.get(c)).filter(|f| !f.is_empty());

            let id = &row[columns.id];
            if id.is_empty() {
                return Err(PedigreeError::Malformed {
                    line,
                    message: "empty ID".to_string(),
                });
            }
            let live = get(columns.live)
                .map(|f| parse_integer::<i64>(f, line, "live"))
                .transpose()?
                .map(|v| v == 1);
            records.push(PedigreeRecord {
                id: id.to_string(),
                father: get(columns.father).map(str::to_string),
                mother: get(columns.mother).map(str::to_string),
                birth_year: get(columns.birth_year)
                    .map(|f| parse_integer(f, line, "YOB"))
                    .transpose()?,
                gender: get(columns.gender)
                    .map(|f| parse_integer(f, line, "gender"))
                    .transpose()?,
                live,
            });
        }

        debug!(records = records.len(), "pedigree read");
        Ok(Self {
            records,
            has_live: columns.live.is_some(),
        })
    }

    /// Writes `ID,father,mother,YOB,gender,live`.
    pub fn write(&self, out: impl Write) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(out);
        wtr.write_record(HEADER)?;
        for r in &self.records {
            let birth_year = r.birth_year.map(|y| y.to_string()).unwrap_or_default();
            let gender = r.gender.map(|g| g.to_string()).unwrap_or_default();
            let live = match r.live {
                Some(true) => "1",
                Some(false) => "0",
                None => "",
            };
            wtr.write_record([
                r.id.as_str(),
                r.father.as_deref().unwrap_or(""),
                r.mother.as_deref().unwrap_or(""),
                birth_year.as_str(),
                gender.as_str(),
                live,
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Identifiers eligible for selection: the live individuals when liveness
    /// is known, everyone otherwise.
    pub fn live_ids(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| !self.has_live || r.live == Some(true))
            .map(|r| r.id.as_str())
            .collect()
    }
}

/// Accepts integral values written as `1995` or `1995.0` that fit in `T`.
fn parse_integer<T: TryFrom<i64>>(field: &str, line: usize, column: &str) -> Result<T> {
    let malformed = |what: &str| PedigreeError::Malformed {
        line,
        message: format!("`{column}` is not {what}: {field:?}"),
    };
    let v = match field.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let v: f64 = field.parse().map_err(|_| malformed("an integer"))?;
            if !v.is_finite() || v.fract() != 0.0 || v.abs() >= i64::MAX as f64 {
                return Err(malformed("an integer"));
            }
            v as i64
        }
    };
    T::try_from(v).map_err(|_| malformed("in range"))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::{Pedigree, PedigreeRecord};
    use crate::error::PedigreeError;

    const TABLE: &str = "\
x,ID,father,mother,YOB,gender
1,a,,,1990,1
2,b,,,1991.0,2
3,c,a,b,2005,1
4,\"d\",a,c,,2
";

    #[test]
    fn parses_columns_by_name() {
        let pedigree = Pedigree::parse(Cursor::new(TABLE)).unwrap();
        assert!(!pedigree.has_live);
        assert_eq!(pedigree.records.len(), 4);
        assert_eq!(
            pedigree.records[2],
            PedigreeRecord {
                id: "c".into(),
                father: Some("a".into()),
                mother: Some("b".into()),
                birth_year: Some(2005),
                gender: Some(1),
                live: None,
            }
        );
        assert_eq!(pedigree.records[1].birth_year, Some(1991));
        assert_eq!(pedigree.records[3].id, "d");
        assert_eq!(pedigree.records[3].birth_year, None);
        assert_eq!(pedigree.live_ids(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn live_column_filters_ids() {
        let text = "ID,mother,live\na,,1\nb,a,0\nc,a,1.0\n";
        let pedigree = Pedigree::parse(Cursor::new(text)).unwrap();
        assert!(pedigree.has_live);
        assert_eq!(pedigree.live_ids(), ["a", "c"]);
    }

    #[test]
    fn rejects_bad_rows() {
        let err = Pedigree::parse(Cursor::new("father,mother\n")).unwrap_err();
        assert!(matches!(err, PedigreeError::MissingColumn("ID")));

        let err = Pedigree::parse(Cursor::new("ID,YOB\na,1990\nb\n")).unwrap_err();
        assert!(matches!(err, PedigreeError::Malformed { line: 3, .. }), "{err}");

        let err = Pedigree::parse(Cursor::new("ID,YOB\na,nineteen\n")).unwrap_err();
        assert!(matches!(err, PedigreeError::Malformed { line: 2, .. }), "{err}");

        let err = Pedigree::parse(Cursor::new("ID,YOB\n,1990\n")).unwrap_err();
        assert!(matches!(err, PedigreeError::Malformed { line: 2, .. }), "{err}");
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let text = "ID,father,mother\n\"Smith, J\",,\nk,\"Smith, J\",\n";
        let pedigree = Pedigree::parse(Cursor::new(text)).unwrap();
        assert_eq!(pedigree.records.len(), 2);
        assert_eq!(pedigree.records[0].id, "Smith, J");
        assert_eq!(pedigree.records[1].father.as_deref(), Some("Smith, J"));

        let mut buf = Vec::new();
        pedigree.write(&mut buf).unwrap();
        let back = Pedigree::parse(Cursor::new(buf)).unwrap();
        assert_eq!(back.records, pedigree.records);
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let err = Pedigree::parse(Cursor::new("ID,YOB,gender\na,2010,257\n")).unwrap_err();
        assert!(matches!(err, PedigreeError::Malformed { line: 2, .. }), "{err}");

        let text = "ID,YOB,gender\na,2010,2\nb,4294969296,2\n";
        let err = Pedigree::parse(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, PedigreeError::Malformed { line: 3, .. }), "{err}");

        let err = Pedigree::parse(Cursor::new("ID,gender\na,-1\n")).unwrap_err();
        assert!(matches!(err, PedigreeError::Malformed { line: 2, .. }), "{err}");

        let err = Pedigree::parse(Cursor::new("ID,YOB\na,1e300\n")).unwrap_err();
        assert!(matches!(err, PedigreeError::Malformed { line: 2, .. }), "{err}");
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();
        let pedigree = Pedigree::read(file.path()).unwrap();
        assert_eq!(pedigree.records.len(), 4);

        let err = Pedigree::read(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(err, PedigreeError::Io(_)));
    }

    #[test]
    fn write_then_read_keeps_liveness() {
        let mut pedigree = Pedigree::parse(Cursor::new(TABLE)).unwrap();
        pedigree.records[0].live = Some(false);
        for r in &mut pedigree.records[1..] {
            r.live = Some(true);
        }
        pedigree.has_live = true;

        let mut buf = Vec::new();
        pedigree.write(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("ID,father,mother,YOB,gender,live\na,,,1990,1,0\n"));

        let back = Pedigree::parse(Cursor::new(text)).unwrap();
        assert_eq!(back.records, pedigree.records);
        assert_eq!(back.live_ids(), ["b", "c", "d"]);
    }
}
