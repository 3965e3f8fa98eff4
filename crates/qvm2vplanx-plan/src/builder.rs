use qvm2vplanx_xlsx::Record;
use tracing::*;

use crate::{
    ids::{Clock, IdGenerator, SystemClock, UuidGenerator},
    schema::{Attribute, MappingPattern, MetaData, MetricsPort, Plan, Section},
};

pub const SOURCE_TOOL: &str = "qvm2vplanx";
pub const SCHEMA_VERSION: &str = "1.0";
pub const DOMAIN_HDL: &str = "HDL";
pub const ENTITY_KIND_INSTANCE: &str = "INSTANCE";
pub const PLANNED_ELEMENTS: &str = "1";

/// Values stamped into every plan's `metaData`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    pub source_tool: String,
    pub tool_version: String,
    pub schema_version: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_tool: SOURCE_TOOL.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}

pub struct PlanBuilder<I, C> {
    pub config: BuildConfig,
    ids: I,
    clock: C,
}

impl PlanBuilder<UuidGenerator, SystemClock> {
    pub fn new(config: BuildConfig) -> Self { Self::with_sources(config, UuidGenerator, SystemClock) }
}

impl<I: IdGenerator, C: Clock> PlanBuilder<I, C> {
    pub fn with_sources(config: BuildConfig, ids: I, clock: C) -> Self { Self { config, ids, clock } }

    /// One section per record, in record order.
    pub fn build(&mut self, plan_name: &str, records: &[Record]) -> Plan {
        let plan_id = self.ids.next_id();

        let meta_data = MetaData {
            id: plan_id.clone(),
            name: plan_name.to_string(),
            plan_id,
            source_tool: self.config.source_tool.clone(),
            tool_version: self.config.tool_version.clone(),
            schema_version: self.config.schema_version.clone(),
            build_time: self.clock.build_time(),
        };

        let root_elements: Vec<Section> = records.iter().map(|r| self.section(r)).collect();

        info!("Built plan [{plan_name}] with {} section(s)", root_elements.len());

        Plan {
            meta_data,
            root_elements,
        }
    }

    fn section(&mut self, record: &Record) -> Section {
        let id = self.ids.next_id();

        let metrics_port = MetricsPort {
            id: self.ids.next_id(),
            name: record.title.clone(),
            mapping_patterns: vec![MappingPattern {
                id: self.ids.next_id(),
                domains: vec![DOMAIN_HDL.to_string()],
                entity_kinds: vec![ENTITY_KIND_INSTANCE.to_string()],
                pattern: record.link.clone(),
            }],
        };

        Section {
            id,
            name: record.title.clone(),
            attributes: vec![
                Attribute::new("details", record.description.as_str()),
                Attribute::new("type", record.r#type.as_str()),
                Attribute::new("planned_elements", PLANNED_ELEMENTS),
            ],
            metrics_port,
        }
    }
}
