//! Console table for values that can describe their own fields.
//!
//! A record lists its fields once as a static [`Field`] slice (name, accessor,
//! metadata). Rendering walks that list, so the table never needs to know the
//! concrete record type. Non-record values are printed on a single line.

use std::{
    fmt::{Debug, Display},
    io::{self, Write},
};

/// Text shown for absent references and zero-valued scalars.
pub const PLACEHOLDER: &str = "value absent";

const MIN_WIDTH: usize = 5;
const MARGIN: usize = 5;

/// A field's value together with the shape it was declared with.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `is_zero` is true when the value equals its type's default.
    Scalar { text: String, is_zero: bool },
    /// Always shown, even when empty.
    Sequence(String),
    /// An `Option` (or any other nullable indirection).
    Reference(Option<Referent>),
}

/// What a present reference points at.
#[derive(Debug, Clone, PartialEq)]
pub enum Referent {
    /// Rendered through the reference itself, e.g. `Some([1, 2])`.
    Sequence(String),
    /// Rendered by dereferencing once.
    Value(String),
}

impl FieldValue {
    /// Zero means `== T::default()`, so for floats `-0.0` counts as zero too.
    pub fn scalar<T: Display + Default + PartialEq>(value: &T) -> Self {
        Self::Scalar {
            text: value.to_string(),
            is_zero: *value == T::default(),
        }
    }

    /// Scalar whose zero check the caller has already done.
    pub fn scalar_with(text: impl Into<String>, is_zero: bool) -> Self {
        Self::Scalar {
            text: text.into(),
            is_zero,
        }
    }

    pub fn sequence<T: Debug>(items: &[T]) -> Self {
        Self::Sequence(format!("{items:?}"))
    }

    pub fn optional<T: Display + ?Sized>(value: Option<&T>) -> Self {
        Self::Reference(value.map(|v| Referent::Value(v.to_string())))
    }

    pub fn optional_sequence<T: Debug>(value: Option<&[T]>) -> Self {
        Self::Reference(value.map(|items| Referent::Sequence(format!("{:?}", Some(items)))))
    }

    /// The cell text, with the placeholder substituted where needed.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Scalar { is_zero: true, .. } | FieldValue::Reference(None) => {
                PLACEHOLDER.to_string()
            }
            FieldValue::Scalar { text, .. }
            | FieldValue::Sequence(text)
            | FieldValue::Reference(Some(Referent::Sequence(text) | Referent::Value(text))) => {
                text.clone()
            }
        }
    }
}

/// Static description of one field of record type `R`.
pub struct Field<R> {
    pub name: &'static str,
    pub read: fn(&R) -> FieldValue,
    /// Free-form annotation printed verbatim in the last column.
    pub metadata: &'static str,
}

/// One rendered-to-be line of a record table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: &'static str,
    pub value: FieldValue,
    pub metadata: &'static str,
}

/// How a value presents itself to the table renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Record(Vec<Row>),
    Plain { type_name: &'static str, value: String },
}

pub trait Tabular {
    fn shape(&self) -> Shape;
}

/// Evaluate every field accessor against `record`, in declaration order.
pub fn rows<R>(record: &R, fields: &[Field<R>]) -> Vec<Row> {
    fields
        .iter()
        .map(|field| Row {
            name: field.name,
            value: (field.read)(record),
            metadata: field.metadata,
        })
        .collect()
}

macro_rules! plain_tabular {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Tabular for $ty {
                fn shape(&self) -> Shape {
                    Shape::Plain {
                        type_name: std::any::type_name::<$ty>(),
                        value: self.to_string(),
                    }
                }
            }
        )*
    };
}

plain_tabular!(bool, char, i32, i64, u32, u64, usize, f32, f64, String, str);

/// Render `value` as text: one line per field for records, a single line otherwise.
pub fn render<T: Tabular + ?Sized>(value: &T) -> String {
    let rows = match value.shape() {
        Shape::Plain { type_name, value } => return format!("{type_name} | {value}\n"),
        Shape::Record(rows) => rows,
    };

    let cells: Vec<String> = rows.iter().map(|row| row.value.display()).collect();
    let name_width = column_width(rows.iter().map(|row| row.name));
    let value_width = column_width(cells.iter().map(String::as_str));

    let mut out = String::new();
    for (row, cell) in rows.iter().zip(&cells) {
        out.push_str(&format!(
            "{:<name_width$} | {:<value_width$} | {}\n",
            row.name, cell, row.metadata
        ));
    }
    out
}

/// Write [`render`]'s output to standard output.
pub fn print<T: Tabular + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(render(value).as_bytes())?;
    stdout.flush()
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|cell| cell.chars().count()).fold(MIN_WIDTH, usize::max) + MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        count: u32,
        missing: u32,
        tags: Vec<&'static str>,
        note: Option<String>,
        history: Option<Vec<i32>>,
    }

    const PROBE_FIELDS: &[Field<Probe>] = &[
        Field {
            name: "count",
            read: |p| FieldValue::scalar(&p.count),
            metadata: "unit=items",
        },
        Field {
            name: "missing",
            read: |p| FieldValue::scalar(&p.missing),
            metadata: "",
        },
        Field {
            name: "tags",
            read: |p| FieldValue::sequence(&p.tags),
            metadata: "list",
        },
        Field {
            name: "note",
            read: |p| FieldValue::optional(p.note.as_deref()),
            metadata: "optional",
        },
        Field {
            name: "history",
            read: |p| FieldValue::optional_sequence(p.history.as_deref()),
            metadata: "optional list",
        },
    ];

    impl Tabular for Probe {
        fn shape(&self) -> Shape {
            Shape::Record(rows(self, PROBE_FIELDS))
        }
    }

    fn present() -> Probe {
        Probe {
            count: 7,
            missing: 0,
            tags: vec!["a", "b"],
            note: Some("windy".to_string()),
            history: Some(vec![1, 2]),
        }
    }

    fn absent() -> Probe {
        Probe {
            count: 7,
            missing: 0,
            tags: Vec::new(),
            note: None,
            history: None,
        }
    }

    fn cells(line: &str) -> Vec<&str> {
        line.split(" | ").map(str::trim_end).collect()
    }

    #[test]
    fn one_line_per_field_in_declaration_order() {
        let out = render(&present());
        let names: Vec<&str> = out.lines().map(|l| cells(l)[0]).collect();
        assert_eq!(names, ["count", "missing", "tags", "note", "history"]);
    }

    #[test]
    fn present_references_and_sequences() {
        let out = render(&present());
        let lines: Vec<Vec<&str>> = out.lines().map(cells).collect();

        assert_eq!(lines[0], ["count", "7", "unit=items"]);
        assert_eq!(lines[1][1], PLACEHOLDER);
        assert_eq!(lines[2][1], r#"["a", "b"]"#);
        assert_eq!(lines[3][1], "windy");
        assert_eq!(lines[4][1], "Some([1, 2])");
    }

    #[test]
    fn absent_references_use_placeholder_but_empty_sequence_does_not() {
        let out = render(&absent());
        let lines: Vec<Vec<&str>> = out.lines().map(cells).collect();

        assert_eq!(lines[2][1], "[]");
        assert_eq!(lines[3][1], PLACEHOLDER);
        assert_eq!(lines[4][1], PLACEHOLDER);
    }

    #[test]
    fn columns_are_padded_to_widest_cell_plus_margin() {
        let out = render(&present());
        let first = out.lines().next().unwrap();

        // "history" (7) + 5 for names, "value absent" (12) + 5 for values.
        let expected = format!("{:<12} | {:<17} | unit=items", "count", "7");
        assert_eq!(first, expected);
    }

    #[test]
    fn narrow_columns_use_minimum_width() {
        struct Tiny {
            a: u32,
        }
        impl Tabular for Tiny {
            fn shape(&self) -> Shape {
                Shape::Record(rows(
                    self,
                    &[Field {
                        name: "a",
                        read: |t: &Tiny| FieldValue::scalar(&t.a),
                        metadata: "m",
                    }],
                ))
            }
        }

        assert_eq!(render(&Tiny { a: 1 }), format!("{:<10} | {:<10} | m\n", "a", "1"));
    }

    #[test]
    fn negative_zero_float_is_treated_as_zero() {
        assert_eq!(FieldValue::scalar(&-0.0_f64).display(), PLACEHOLDER);
        assert_eq!(FieldValue::scalar(&0.0_f64).display(), PLACEHOLDER);
        assert_eq!(FieldValue::scalar(&-0.5_f64).display(), "-0.5");
    }

    #[test]
    fn rendering_is_idempotent() {
        let probe = present();
        assert_eq!(render(&probe), render(&probe));
    }

    #[test]
    fn plain_values_render_on_one_line() {
        assert_eq!(render(&42_i64), "i64 | 42\n");
        assert_eq!(render("hello"), "str | hello\n");
    }
}
