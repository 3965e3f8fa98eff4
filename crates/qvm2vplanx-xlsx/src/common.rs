use quick_xml::{
    Decoder, Reader,
    events::{BytesRef, BytesStart, Event},
};
use std::io::BufRead;

use crate::error::{XlsxError, XlsxErrorReport};

pub trait XmlReader<'de> {
    fn next(&mut self) -> Result<Event<'de>, XlsxErrorReport>;
    fn decoder(&self) -> Decoder;
}

pub struct IoReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> IoReader<R> {
    #[inline]
    pub fn new(reader: Reader<R>) -> Self {
        Self {
            reader,
            buf: vec![],
        }
    }

    pub fn from_reader(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().check_end_names = false;

        Self::new(xml_reader)
    }
}

impl<'de, R: BufRead> XmlReader<'de> for IoReader<R> {
    #[inline]
    fn next(&mut self) -> Result<Event<'de>, XlsxErrorReport> {
        self.buf.clear();

        Ok(self
            .reader
            .read_event_into(&mut self.buf)
            .map_err(XlsxError::from)?
            .into_owned())
    }

    #[inline]
    fn decoder(&self) -> Decoder { self.reader.decoder() }
}

pub struct SliceReader<'de> {
    reader: Reader<&'de [u8]>,
}

impl<'de> SliceReader<'de> {
    #[inline]
    pub fn new(reader: Reader<&'de [u8]>) -> Self { Self { reader } }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &'de str) -> Self {
        let mut xml_reader = Reader::from_str(xml);
        xml_reader.config_mut().check_end_names = false;

        Self::new(xml_reader)
    }
}

impl<'de> XmlReader<'de> for SliceReader<'de> {
    #[inline]
    fn next(&mut self) -> Result<Event<'de>, XlsxErrorReport> {
        Ok(self.reader.read_event().map_err(XlsxError::from)?)
    }

    #[inline]
    fn decoder(&self) -> Decoder { self.reader.decoder() }
}

pub trait Deserializeable: Sized {
    fn from_str(str: impl AsRef<str>) -> Result<Self, XlsxErrorReport> {
        Self::deserialize_inner(&mut SliceReader::from_str(str.as_ref()))
    }

    fn from_reader(reader: impl BufRead) -> Result<Self, XlsxErrorReport> {
        Self::deserialize_inner(&mut IoReader::from_reader(reader))
    }

    fn deserialize_inner<'de>(xml_reader: &mut impl XmlReader<'de>) -> Result<Self, XlsxErrorReport>;
}

/// Appends the character data carried by `event` to `out`.
///
/// Returns `false` for events that carry no text so callers can fall through
/// to their own structural handling.
pub(crate) fn push_text_event(event: &Event<'_>, out: &mut String) -> Result<bool, XlsxErrorReport> {
    match event {
        Event::Text(t) => {
            out.push_str(&t.decode().map_err(XlsxError::from)?);
        }
        Event::CData(c) => {
            out.push_str(&String::from_utf8_lossy(c));
        }
        Event::GeneralRef(r) => {
            push_general_ref(r, out)?;
        }
        _ => return Ok(false),
    }

    Ok(true)
}

fn push_general_ref(r: &BytesRef<'_>, out: &mut String) -> Result<(), XlsxErrorReport> {
    let name = r.decode().map_err(XlsxError::from)?;

    if let Some(char_ref) = name.strip_prefix('#') {
        let code = match char_ref.strip_prefix('x').or_else(|| char_ref.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => char_ref.parse::<u32>().ok(),
        };

        match code.and_then(char::from_u32) {
            Some(ch) => out.push(ch),
            None => {
                tracing::warn!("Dropping invalid character reference [&{name};]");
            }
        }
    } else if let Some(resolved) = quick_xml::escape::resolve_predefined_entity(&name) {
        out.push_str(resolved);
    } else {
        tracing::warn!("Dropping unknown entity reference [&{name};]");
    }

    Ok(())
}

/// Looks up an attribute by its local name, ignoring any namespace prefix.
pub(crate) fn attribute_value<'de>(
    xml_reader: &impl XmlReader<'de>,
    e: &BytesStart<'_>,
    local_name: &[u8],
) -> Result<Option<String>, XlsxErrorReport> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(XlsxError::from)?;

        if attr.key.local_name().as_ref() == local_name {
            return Ok(Some(
                attr.decode_and_unescape_value(xml_reader.decoder())
                    .map_err(XlsxError::from)?
                    .into_owned(),
            ));
        }
    }

    Ok(None)
}

pub fn resolve_zip_file_path(path: &str) -> String {
    let mut stack = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => {
                stack.push(component);
            }
        }
    }

    stack.join("/")
}
