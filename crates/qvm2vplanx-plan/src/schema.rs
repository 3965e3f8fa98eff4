//! The vPlanx document tree and its XML serialization.

use quick_xml::escape::escape;

pub const VPLANX_NAMESPACE: &str = "http://www.cadence.com/vplanx";

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

pub trait Serializeable {
    const NAME: &str;

    fn xml_tag_attributes(&self) -> Option<String> { None }

    fn xml_inner(&self) -> Option<String>;

    fn to_xml_string(&self) -> String {
        let mut xml = String::with_capacity(64);

        xml.push('<');
        xml.push_str(Self::NAME);

        if let Some(attributes) = self.xml_tag_attributes() {
            xml.push_str(&attributes);
        }

        match self.xml_inner() {
            Some(inner) => {
                xml.push('>');
                xml.push_str(&inner);
                xml.push_str("</");
                xml.push_str(Self::NAME);
                xml.push('>');
            }
            None => xml.push_str("/>"),
        }

        xml
    }
}

#[inline]
pub fn as_xml_attribute(key: &str, value: &str) -> String {
    format!(r#" {key}="{}""#, escape(value))
}

#[inline]
fn push_text_element(xml: &mut String, name: &str, text: &str) {
    xml.push('<');
    xml.push_str(name);
    xml.push('>');
    xml.push_str(&escape(text));
    xml.push_str("</");
    xml.push_str(name);
    xml.push('>');
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub meta_data: MetaData,
    pub root_elements: Vec<Section>,
}

impl Plan {
    /// The complete document, declaration included.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(&self.to_xml_string());
        xml
    }
}

impl Serializeable for Plan {
    const NAME: &str = "vplanx:plan";

    fn xml_tag_attributes(&self) -> Option<String> {
        Some(as_xml_attribute("xmlns:vplanx", VPLANX_NAMESPACE))
    }

    fn xml_inner(&self) -> Option<String> {
        let mut xml = String::with_capacity(512 + self.root_elements.len() * 640);

        xml.push_str(&self.meta_data.to_xml_string());

        xml.push_str("<rootElements>");
        for section in &self.root_elements {
            xml.push_str(&section.to_xml_string());
        }
        xml.push_str("</rootElements>");

        Some(xml)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaData {
    pub id: String,
    pub name: String,
    pub plan_id: String,
    pub source_tool: String,
    pub tool_version: String,
    pub schema_version: String,
    pub build_time: String,
}

impl Serializeable for MetaData {
    const NAME: &str = "metaData";

    fn xml_tag_attributes(&self) -> Option<String> { Some(as_xml_attribute("id", &self.id)) }

    fn xml_inner(&self) -> Option<String> {
        let mut xml = String::with_capacity(256);

        push_text_element(&mut xml, "name", &self.name);
        push_text_element(&mut xml, "planId", &self.plan_id);
        push_text_element(&mut xml, "sourceTool", &self.source_tool);
        push_text_element(&mut xml, "toolVersion", &self.tool_version);
        push_text_element(&mut xml, "schemaVersion", &self.schema_version);
        push_text_element(&mut xml, "buildTime", &self.build_time);

        Some(xml)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub metrics_port: MetricsPort,
}

impl Serializeable for Section {
    const NAME: &str = "section";

    fn xml_tag_attributes(&self) -> Option<String> { Some(as_xml_attribute("id", &self.id)) }

    fn xml_inner(&self) -> Option<String> {
        let mut xml = String::with_capacity(640);

        push_text_element(&mut xml, "name", &self.name);

        xml.push_str("<attributes>");
        for attribute in &self.attributes {
            xml.push_str(&attribute.to_xml_string());
        }
        xml.push_str("</attributes>");

        xml.push_str(&self.metrics_port.to_xml_string());

        Some(xml)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Serializeable for Attribute {
    const NAME: &str = "attribute";

    fn xml_inner(&self) -> Option<String> {
        let mut xml = String::with_capacity(64);

        push_text_element(&mut xml, "name", &self.name);
        push_text_element(&mut xml, "value", &self.value);

        Some(xml)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsPort {
    pub id: String,
    pub name: String,
    pub mapping_patterns: Vec<MappingPattern>,
}

impl Serializeable for MetricsPort {
    const NAME: &str = "metricsPort";

    fn xml_tag_attributes(&self) -> Option<String> { Some(as_xml_attribute("id", &self.id)) }

    fn xml_inner(&self) -> Option<String> {
        let mut xml = String::with_capacity(320);

        push_text_element(&mut xml, "name", &self.name);

        xml.push_str("<mappingPatterns>");
        for pattern in &self.mapping_patterns {
            xml.push_str(&pattern.to_xml_string());
        }
        xml.push_str("</mappingPatterns>");

        Some(xml)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingPattern {
    pub id: String,
    pub domains: Vec<String>,
    pub entity_kinds: Vec<String>,
    pub pattern: String,
}

impl Serializeable for MappingPattern {
    const NAME: &str = "mappingPattern";

    fn xml_tag_attributes(&self) -> Option<String> { Some(as_xml_attribute("id", &self.id)) }

    fn xml_inner(&self) -> Option<String> {
        let mut xml = String::with_capacity(256);

        xml.push_str("<domains>");
        for domain in &self.domains {
            push_text_element(&mut xml, "domain", domain);
        }
        xml.push_str("</domains>");

        xml.push_str("<entityKinds>");
        for entity_kind in &self.entity_kinds {
            push_text_element(&mut xml, "entityKind", entity_kind);
        }
        xml.push_str("</entityKinds>");

        push_text_element(&mut xml, "pattern", &self.pattern);

        Some(xml)
    }
}
