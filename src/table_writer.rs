//! Column alignment for generated declaration blocks.
//!
//! Rows of cells are laid out so that every column starts at the same offset
//! on every line. Each cell is preceded by a single separator space unless it
//! begins with [`NO_PAD_MARKER`], in which case it is placed flush and the
//! marker is dropped. Marking the first cell lets the caller own the left
//! margin exactly.

pub const NO_PAD_MARKER: char = '#';

const SEPARATOR: &str = " ";

struct Cell<'a> {
    flush: bool,
    text: &'a str,
}

impl<'a> Cell<'a> {
    fn parse(raw: &'a str) -> Self {
        match raw.strip_prefix(NO_PAD_MARKER) {
            Some(text) => Cell { flush: true, text },
            None => Cell { flush: false, text: raw },
        }
    }

    fn lead(&self) -> &'static str {
        if self.flush {
            ""
        } else {
            SEPARATOR
        }
    }

    fn width(&self) -> usize {
        self.lead().len() + self.text.chars().count()
    }
}

#[derive(Debug, Default, Clone)]
pub struct TableWriter {
    rows: Vec<Vec<String>>,
}

impl TableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn append_bulk<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        self.rows.extend(rows);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders every row as one line, each terminated by `\n`.
    pub fn render(&self) -> String {
        let rows: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| Cell::parse(cell)).collect())
            .collect();

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|column| {
                rows.iter()
                    .filter_map(|row| row.get(column))
                    .map(Cell::width)
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for row in &rows {
            let mut line = String::new();
            for (column, cell) in row.iter().enumerate() {
                line.push_str(cell.lead());
                line.push_str(cell.text);
                if column + 1 < row.len() {
                    let pad = widths[column] - cell.width();
                    line.extend(std::iter::repeat(' ').take(pad));
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn second_column_starts_at_same_offset() {
        let mut writer = TableWriter::new();
        writer.append_bulk(vec![
            row(&["#    Id:", "in.Id,"]),
            row(&["#    LongerName:", "in.LongerName,"]),
            row(&["#    X:", "in.X,"]),
        ]);

        let rendered = writer.render();
        let offsets: Vec<usize> = rendered
            .lines()
            .map(|line| line.find("in.").unwrap())
            .collect();

        assert_eq!(offsets.len(), 3);
        assert!(offsets.iter().all(|offset| *offset == offsets[0]));
        assert_eq!(offsets[0], "    LongerName: ".len());
    }

    #[test]
    fn marker_controls_left_margin_and_is_stripped() {
        let mut writer = TableWriter::new();
        writer.append(row(&["#\tName", "string"]));
        writer.append(row(&["plain", "int"]));

        let rendered = writer.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "\tName  string");
        assert_eq!(lines[1], " plain int");
        assert!(!rendered.contains(NO_PAD_MARKER));
    }

    #[test]
    fn short_rows_and_trailing_space() {
        let mut writer = TableWriter::new();
        writer.append(row(&["#A", "int", "// first"]));
        writer.append(row(&["#Bbb", "string"]));

        assert_eq!(writer.render(), "A   int    // first\nBbb string\n");
    }

    #[test]
    fn empty_writer_renders_nothing() {
        let writer = TableWriter::new();

        assert!(writer.is_empty());
        assert_eq!(writer.render(), "");
    }
}
