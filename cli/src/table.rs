// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt, marker::PhantomData};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

pub struct Table<'a, S: TableStyle, T, C: TableColumn<T>> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, T, C: TableColumn<T>> Table<'a, S, T, C> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, T, C: TableColumn<T>> fmt::Display for Table<'_, S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.fmt(f, self.columns, self.data)
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

pub trait TableStyle {
    fn fmt<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

/// Space separated, padded, colored columns.
#[derive(Debug, Clone)]
pub struct TableStyleBasic {
    separator: &'static str,
    padding: bool,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self {
            separator: " ",
            padding: true,
        }
    }
}

impl TableStyle for TableStyleBasic {
    fn fmt<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let table: Vec<Vec<Cow<'_, str>>> = data
            .iter()
            .map(|row| columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let stylizers = self.compute_columns(columns, &table);

        for (i, (cells, row)) in table.iter().zip(data).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, (col, cell)) in stylizers.iter().zip(cells).enumerate() {
                if j > 0 {
                    write!(f, "{}", self.separator)?;
                }
                write!(f, "{}", col.stylize_cell(row, cell))?;
            }
        }
        Ok(())
    }
}

impl TableStyleBasic {
    fn compute_columns<'a, T, C: TableColumn<T>>(
        &self,
        columns: &'a [C],
        table: &[Vec<Cow<'_, str>>],
    ) -> Vec<ColumnStylizer<'a, T, C>> {
        let max_lengths = self.padding.then(|| get_column_max_width(columns.len(), table));

        columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let padding_direction = col.padding_direction();
                let padding = match &max_lengths {
                    // Last column does not need padding if it's left-aligned
                    Some(_)
                        if i == columns.len() - 1
                            && padding_direction == PaddingDirection::Left =>
                    {
                        None
                    }
                    Some(m) => Some((m[i], padding_direction)),
                    None => None,
                };
                ColumnStylizer {
                    column: col,
                    padding,
                    _marker: PhantomData,
                }
            })
            .collect()
    }
}

/// A JSON array of objects keyed by column name.
#[derive(Debug, Clone)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn fmt<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| {
                        let value = serde_json::Value::String(col.format(row).into_owned());
                        (col.name().into_owned(), value)
                    })
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

struct ColumnStylizer<'a, T, C: TableColumn<T>> {
    column: &'a C,
    /// padding width and direction
    padding: Option<(usize, PaddingDirection)>,
    _marker: PhantomData<T>,
}

impl<T, C: TableColumn<T>> ColumnStylizer<'_, T, C> {
    fn stylize_cell(&self, data: &T, cell: &str) -> String {
        let cell = match self.padding {
            Some((width, direction)) => {
                let fill = " ".repeat(width.saturating_sub(cell.width()));
                match direction {
                    PaddingDirection::Left => format!("{cell}{fill}"),
                    PaddingDirection::Right => format!("{fill}{cell}"),
                }
            }
            None => cell.to_string(),
        };

        match self.column.get_color(data) {
            Some(color) => cell.color(color).to_string(),
            None => cell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

fn get_column_max_width(num_columns: usize, table: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
    let mut max_width = vec![0; num_columns];
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            max_width[i] = max_width[i].max(cell.width());
        }
    }
    max_width
}
