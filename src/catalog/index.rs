// ==========================================
// Obra Schedule - Bidirectional Code/Name Index
// ==========================================
// One index built at catalog construction, queried in O(1), so the
// multi-strategy matching stays sub-quadratic across thousands of
// entries and multiple baselines.
// ==========================================

use crate::domain::stage::Stage;
use std::collections::HashMap;

// ==========================================
// NameIndex - code <-> full-name lookup
// ==========================================
// Matching strategies, tried in order until one succeeds:
//   1. exact stored-field match (short code)
//   2. short-code -> full-name translation (exact full name)
//   3. full-name -> short-code translation (covered by the same map)
//   4. case/whitespace-normalized comparison, both schemes
#[derive(Debug, Default)]
pub struct NameIndex {
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    by_code_norm: HashMap<String, usize>,
    by_name_norm: HashMap<String, usize>,
}

impl NameIndex {
    pub fn build(stages: &[Stage]) -> Self {
        let mut index = NameIndex::default();
        for (i, stage) in stages.iter().enumerate() {
            index.by_code.insert(stage.code.clone(), i);
            index.by_name.insert(stage.full_name.clone(), i);
            index.by_code_norm.insert(normalize(&stage.code), i);
            index.by_name_norm.insert(normalize(&stage.full_name), i);
        }
        index
    }

    /// Resolve a label in either naming scheme to a catalog position.
    pub fn resolve(&self, label: &str) -> Option<usize> {
        if let Some(&i) = self.by_code.get(label) {
            return Some(i);
        }
        if let Some(&i) = self.by_name.get(label) {
            return Some(i);
        }
        let norm = normalize(label);
        if let Some(&i) = self.by_code_norm.get(&norm) {
            return Some(i);
        }
        self.by_name_norm.get(&norm).copied()
    }
}

/// Trim, collapse inner whitespace, uppercase.
pub fn normalize(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
