use quick_xml::events::Event;
use tracing::*;

use crate::{common::*, error::XlsxErrorReport};

/// The `xl/sharedStrings.xml` string pool, one plain-text entry per `<si>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharedStrings {
    pub items: Vec<String>,
}

impl SharedStrings {
    pub const PATH: &str = "xl/sharedStrings.xml";

    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> { self.items.get(index).map(String::as_str) }

    #[inline]
    pub fn len(&self) -> usize { self.items.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl Deserializeable for SharedStrings {
    fn deserialize_inner<'de>(xml_reader: &mut impl XmlReader<'de>) -> Result<Self, XlsxErrorReport> {
        let mut items = vec![];

        let mut current: Option<String> = None;
        let mut in_text = false;
        // Phonetic guides (`<rPh>`) carry their own `<t>` runs that are not cell text.
        let mut phonetic_depth = 0usize;

        loop {
            let event = xml_reader.next()?;

            match &event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => current = Some(String::new()),
                    b"rPh" => phonetic_depth += 1,
                    b"t" => in_text = current.is_some() && phonetic_depth == 0,
                    _ => (),
                },
                Event::Empty(e) => {
                    if e.local_name().as_ref() == b"si" {
                        items.push(String::new());
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"si" => {
                        items.push(current.take().unwrap_or_default());
                        in_text = false;
                    }
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => (),
                },
                Event::Eof => break,
                _ => {
                    if in_text && let Some(current) = current.as_mut() {
                        push_text_event(&event, current)?;
                    }
                }
            }
        }

        debug!("Loaded {} shared strings", items.len());

        Ok(Self { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SST: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
  <si><t>Title</t></si>
  <si><r><rPr><b/></rPr><t>Rich </t></r><r><t xml:space="preserve">text </t></r><r><t>run</t></r></si>
  <si/>
  <si><t>漢字</t><rPh sb="0" eb="2"><t>かんじ</t></rPh></si>
  <si><t>A &amp; B</t></si>
</sst>"#;

    #[test]
    fn test_shared_strings() -> Result<(), XlsxErrorReport> {
        let sst = SharedStrings::from_str(SST)?;

        assert_eq!(sst.items, vec!["Title", "Rich text run", "", "漢字", "A & B"]);
        assert_eq!(sst.get(1), Some("Rich text run"));
        assert_eq!(sst.get(5), None);

        Ok(())
    }

    #[test]
    fn test_prefixed_shared_strings() -> Result<(), XlsxErrorReport> {
        let sst = SharedStrings::from_reader(
            r#"<x:sst xmlns:x="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><x:si><x:t>Link</x:t></x:si></x:sst>"#
                .as_bytes(),
        )?;

        assert_eq!(sst.items, vec!["Link"]);

        Ok(())
    }
}
