//! Row table — the dialogue file held as rows of raw cells.
//!
//! Rows keep their file position for the whole session; a row's index is
//! how dialogue entries find their way back to it on save. Cells are split
//! on a bare comma: there is no quoting, so a comma inside dialogue text
//! produces an extra cell.

/// Column delimiter of dialogue files.
pub const DELIMITER: &str = ",";

/// Column holding the optional view count.
pub const VIEWS_COLUMN: usize = 3;

/// One line of the dialogue file, split into cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn parse(line: &str) -> Self {
        Self {
            cells: line.split(DELIMITER).map(str::to_string).collect(),
        }
    }

    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Write `value` into `column`, widening the row first if it is too narrow.
    ///
    /// Widening builds a fresh cell vector of exactly `column + 1` cells,
    /// copies the existing cells across and pads the gap with empty cells.
    pub fn set_cell(&mut self, column: usize, value: impl Into<String>) {
        if self.cells.len() <= column {
            let mut widened = Vec::with_capacity(column + 1);
            widened.extend(self.cells.iter().cloned());
            widened.resize(column + 1, String::new());
            self.cells = widened;
        }
        self.cells[column] = value.into();
    }

    pub fn to_line(&self) -> String {
        self.cells.join(DELIMITER)
    }
}

/// All rows of a dialogue file, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowTable {
    rows: Vec<Row>,
}

impl RowTable {
    /// Split raw file text into rows. Every line becomes a row, blank lines included.
    pub fn parse(text: &str) -> Self {
        Self {
            rows: text.lines().map(Row::parse).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Reassemble the file text: cells joined by the delimiter, each row
    /// followed by a newline.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.to_line());
            out.push('\n');
        }
        out
    }
}

impl FromIterator<Row> for RowTable {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
