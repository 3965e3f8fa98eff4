use quick_xml::events::Event;
use tracing::*;

use crate::{common::*, error::XlsxErrorReport, models::Row, shared_strings::SharedStrings};

/// A `<c>` element as it appears in the sheet, before shared strings are applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCell {
    pub shared: bool,
    pub value: Option<String>,
}

impl RawCell {
    /// Resolves the cell to display text. Anything unusable becomes an empty string.
    pub fn resolve(&self, shared_strings: &SharedStrings) -> String {
        let Some(value) = &self.value else {
            return String::new();
        };

        if !self.shared {
            return value.clone();
        }

        match value.trim().parse::<usize>() {
            Ok(index) => match shared_strings.get(index) {
                Some(s) => s.to_string(),
                None => {
                    warn!(
                        "Shared string index {index} out of range (table has {} entries)",
                        shared_strings.len()
                    );
                    String::new()
                }
            },
            Err(_) => {
                warn!("Shared string cell holds a non-numeric index [{value}]");
                String::new()
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Worksheet {
    pub rows: Vec<Vec<RawCell>>,
}

impl Worksheet {
    pub fn materialize(&self, shared_strings: &SharedStrings) -> Vec<Row> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.resolve(shared_strings)).collect())
            .collect()
    }
}

impl Deserializeable for Worksheet {
    fn deserialize_inner<'de>(xml_reader: &mut impl XmlReader<'de>) -> Result<Self, XlsxErrorReport> {
        let mut rows = vec![];

        let mut row: Option<Vec<RawCell>> = None;
        let mut cell: Option<RawCell> = None;
        let mut in_value = false;

        loop {
            let event = xml_reader.next()?;

            match &event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"row" => row = Some(vec![]),
                    b"c" if row.is_some() => {
                        cell = Some(RawCell {
                            shared: attribute_value(&*xml_reader, e, b"t")?.as_deref() == Some("s"),
                            value: None,
                        });
                    }
                    b"v" => {
                        if let Some(cell) = cell.as_mut() {
                            cell.value = Some(String::new());
                            in_value = true;
                        }
                    }
                    _ => (),
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"row" => rows.push(vec![]),
                    b"c" => {
                        if let Some(row) = row.as_mut() {
                            row.push(RawCell::default());
                        }
                    }
                    b"v" => {
                        if let Some(cell) = cell.as_mut() {
                            cell.value = Some(String::new());
                        }
                    }
                    _ => (),
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"row" => {
                        if let Some(row) = row.take() {
                            rows.push(row);
                        }
                    }
                    b"c" => {
                        if let (Some(row), Some(cell)) = (row.as_mut(), cell.take()) {
                            row.push(cell);
                        }
                    }
                    b"v" => in_value = false,
                    _ => (),
                },
                Event::Eof => break,
                _ => {
                    if in_value && let Some(value) = cell.as_mut().and_then(|c| c.value.as_mut()) {
                        push_text_event(&event, value)?;
                    }
                }
            }
        }

        debug!("Read {} worksheet rows", rows.len());

        Ok(Self { rows })
    }
}
