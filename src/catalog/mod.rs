// ==========================================
// Obra Schedule - Stage Catalog & Normalizer
// ==========================================
// Static taxonomy: canonical codes, full names, sector/group
// classification, total ordering, parent/child stage map. Loaded once
// at startup; the engines hold a shared reference.
// ==========================================

pub mod index;
mod stages;

use crate::domain::stage::{Stage, StageClass, UNKNOWN_STAGE_CODE};
use crate::domain::types::BufferClass;
use crate::domain::ScheduleEntry;
use index::NameIndex;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// StageCatalog
// ==========================================
pub struct StageCatalog {
    stages: Vec<Stage>,
    index: NameIndex,
    children: HashMap<String, Vec<String>>,
}

impl StageCatalog {
    /// Catalog over the standard construction lifecycle taxonomy.
    pub fn standard() -> Self {
        let stages = stages::STANDARD_STAGES
            .iter()
            .enumerate()
            .map(|(order_index, def)| Stage {
                code: def.code.to_string(),
                full_name: def.full_name.to_string(),
                sector: def.sector.to_string(),
                group: def.group.to_string(),
                order_index,
                parent_code: def.parent.map(|p| p.to_string()),
                buffer_class: def.buffer_class,
            })
            .collect();
        Self::from_stages(stages)
    }

    /// Catalog over an explicit stage list (order of the list is the
    /// total order).
    pub fn from_stages(stages: Vec<Stage>) -> Self {
        let index = NameIndex::build(&stages);
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for stage in &stages {
            if let Some(parent) = &stage.parent_code {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(stage.code.clone());
            }
        }
        Self {
            stages,
            index,
            children,
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Resolve a label in either naming scheme to its stage.
    pub fn resolve(&self, label: &str) -> Option<&Stage> {
        self.index.resolve(label).map(|i| &self.stages[i])
    }

    /// Canonical short code for a raw label.
    ///
    /// Unmapped input yields the `UNKNOWN` sentinel and a warning,
    /// never an error.
    pub fn canonicalize(&self, raw_label: &str) -> String {
        match self.resolve(raw_label) {
            Some(stage) => stage.code.clone(),
            None => {
                warn!(label = raw_label, "unmapped stage label, using UNKNOWN");
                UNKNOWN_STAGE_CODE.to_string()
            }
        }
    }

    /// Sector/group/order classification. Missing entries default to
    /// "unspecified" and sort after all known stages.
    pub fn classify(&self, label: &str) -> StageClass {
        match self.resolve(label) {
            Some(stage) => StageClass {
                sector: stage.sector.clone(),
                group: stage.group.clone(),
                order_index: Some(stage.order_index),
            },
            None => StageClass::unspecified(),
        }
    }

    pub fn parent_of(&self, label: &str) -> Option<&str> {
        self.resolve(label)
            .and_then(|s| s.parent_code.as_deref())
    }

    pub fn children_of(&self, code: &str) -> &[String] {
        self.children
            .get(code)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Stages that have at least one sub-stage, in catalog order.
    pub fn parent_stages(&self) -> impl Iterator<Item = &Stage> {
        self.stages
            .iter()
            .filter(|s| self.children.contains_key(&s.code))
    }

    pub fn full_name_of(&self, label: &str) -> Option<&str> {
        self.resolve(label).map(|s| s.full_name.as_str())
    }

    /// Buffer simulation behavior. Stages outside the catalog behave as
    /// standard.
    pub fn buffer_class(&self, label: &str) -> BufferClass {
        self.resolve(label)
            .map(|s| s.buffer_class)
            .unwrap_or(BufferClass::Standard)
    }

    /// Stable sort by the fixed total order; stages outside it sort
    /// after all known stages, keeping encounter order.
    pub fn sort_entries(&self, entries: &mut [ScheduleEntry]) {
        entries.sort_by_key(|e| {
            self.resolve(&e.stage_code)
                .map(|s| s.order_index)
                .unwrap_or(usize::MAX)
        });
    }
}
