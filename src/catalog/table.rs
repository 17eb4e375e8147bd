//! GitHub-flavoured markdown tables

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A table with padded, aligned columns
#[derive(Debug, Clone)]
pub struct MarkdownTable {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = (S, Align)>) -> Self {
        let (headers, align) = headers
            .into_iter()
            .map(|(h, a)| (h.into(), a))
            .unzip();

        Self {
            headers,
            align,
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells are left empty, extra cells are ignored
    pub fn push_row(&mut self, cells: Vec<String>) {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(|c| c.replace('|', "\\|"))
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|i| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(self.headers[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&self.render_row(&self.headers, &widths));

        // Plain dashes only; alignment shows in the cell padding
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        out.push_str(&format!("|{}|\n", separator.join("|")));

        for row in &self.rows {
            out.push_str(&self.render_row(row, &widths));
        }

        out
    }

    fn render_row(&self, cells: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.align)
            .map(|((cell, &w), a)| match a {
                Align::Left => format!("{:<w$}", cell, w = w),
                Align::Right => format!("{:>w$}", cell, w = w),
            })
            .collect();
        format!("| {} |\n", cells.join(" | "))
    }
}
