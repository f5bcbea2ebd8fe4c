//! Tab-separated tables of posts.
//!
//! Cells are kept as strings. List-valued columns hold bracketed literals of
//! quoted strings (`['a', 'b']`) and booleans are written `True`/`False`, so
//! the files stay interchangeable with the existing dataframe tooling.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::config::{BatchConfig, MalformedRowPolicy};
use crate::error::TableError;
use crate::types::Post;

/// Field delimiter.
pub const DELIMITER: u8 = b'\t';

/// An in-memory table with a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Posts extracted from a table together with the rows they came from.
#[derive(Debug, Clone, Default)]
pub struct PostRows {
    /// The well-formed rows, in input order.
    pub table: Table,
    /// One post per row of `table`.
    pub posts: Vec<Post>,
    /// Number of malformed rows that were skipped.
    pub skipped: usize,
}

impl Table {
    /// Create an empty table with the given header.
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Read a tab-separated file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    pub fn read_tsv(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(path = %path.display(), rows = table.len(), "Read table");
        Ok(table)
    }

    /// Read tab-separated data from a reader. Ragged rows are kept as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be decoded.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }

    /// Write the table as a tab-separated file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_tsv(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        self.to_writer(std::io::BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), rows = self.len(), "Wrote table");
        Ok(())
    }

    /// Write the table as tab-separated data.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .flexible(true)
            .from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Column names.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column called `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the column called `name`, or an error.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MissingColumn` if there is no such column.
    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Cells of the column called `name`; missing cells read as empty.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MissingColumn` if there is no such column.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let idx = self.require_column(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).map_or("", String::as_str))
            .collect())
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns `TableError::ShapeMismatch` if the row length differs from
    /// the header length.
    pub fn push_row<I, S>(&mut self, row: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.headers.len() {
            return Err(TableError::ShapeMismatch {
                expected: self.headers.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Set the column called `name`, replacing it if it already exists and
    /// appending it otherwise.
    ///
    /// # Errors
    ///
    /// Returns `TableError::ShapeMismatch` if `values` does not hold one
    /// value per row.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<(), TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::ShapeMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        let idx = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            }
        };
        let width = self.headers.len();
        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row[idx] = value;
        }
        Ok(())
    }

    /// Split the table into posts.
    ///
    /// A row is malformed when its length differs from the header or its
    /// URL cell is not a list literal. Malformed rows are dropped or fail
    /// the whole table, depending on `batch.malformed_rows`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing, or if a row is
    /// malformed and the policy is `Fail`.
    pub fn into_posts(self, batch: &BatchConfig, with_urls: bool) -> Result<PostRows, TableError> {
        let text_idx = self.require_column(&batch.text_column)?;
        let urls_idx = if with_urls {
            Some(self.require_column(&batch.urls_column)?)
        } else {
            None
        };

        let width = self.headers.len();
        let mut out = PostRows {
            table: Table::new(self.headers.iter().cloned()),
            ..PostRows::default()
        };

        for (i, row) in self.rows.into_iter().enumerate() {
            match row_to_post(&row, width, text_idx, urls_idx) {
                Ok(post) => {
                    out.posts.push(post);
                    out.table.rows.push(row);
                }
                Err(reason) => match batch.malformed_rows {
                    MalformedRowPolicy::Fail => {
                        return Err(TableError::MalformedRow { row: i + 1, reason });
                    }
                    MalformedRowPolicy::Skip => {
                        tracing::warn!(row = i + 1, %reason, "Skipping malformed row");
                        out.skipped += 1;
                    }
                },
            }
        }

        Ok(out)
    }
}

fn row_to_post(
    row: &[String],
    width: usize,
    text_idx: usize,
    urls_idx: Option<usize>,
) -> Result<Post, String> {
    if row.len() != width {
        return Err(format!("expected {width} cells, found {}", row.len()));
    }
    let mut post = Post::new(row[text_idx].as_str());
    if let Some(idx) = urls_idx {
        post.urls = parse_list_literal(&row[idx]).map_err(|e| e.to_string())?;
    }
    Ok(post)
}

/// Format a boolean as `True` or `False`.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

/// Parse a list-of-strings literal such as `['a', "b"]`.
///
/// An empty cell is an empty list.
///
/// # Errors
///
/// Returns `TableError::InvalidListLiteral` if `cell` is not a list of
/// quoted strings.
pub fn parse_list_literal(cell: &str) -> Result<Vec<String>, TableError> {
    let invalid = || TableError::InvalidListLiteral(cell.to_string());
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;

    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let quote = match chars.next() {
            None => break,
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return Err(invalid()),
        };

        let mut item = String::new();
        loop {
            match chars.next().ok_or_else(invalid)? {
                '\\' => match chars.next().ok_or_else(invalid)? {
                    'n' => item.push('\n'),
                    't' => item.push('\t'),
                    'r' => item.push('\r'),
                    other => item.push(other),
                },
                c if c == quote => break,
                c => item.push(c),
            }
        }
        items.push(item);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => {}
            Some(_) => return Err(invalid()),
        }
    }
    Ok(items)
}

/// Format strings as a list literal, single-quoted unless an item
/// contains only single quotes.
#[must_use]
pub fn format_list_literal<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote_item(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

fn quote_item(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Insert `suffix` between the file stem and the extension of `input`.
///
/// `data/posts.tsv` with `_cat1` becomes `data/posts_cat1.tsv`.
#[must_use]
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    input.with_file_name(name)
}
