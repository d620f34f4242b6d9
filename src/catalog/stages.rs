// ==========================================
// Obra Schedule - Standard Stage Taxonomy
// ==========================================
// Static configuration: canonical codes, full names, sector/group
// classification, total ordering, parent map and buffer behavior for
// the standard residential-construction lifecycle.
// ==========================================

use crate::domain::types::BufferClass;

pub(crate) struct StageDef {
    pub code: &'static str,
    pub full_name: &'static str,
    pub sector: &'static str,
    pub group: &'static str,
    pub parent: Option<&'static str>,
    pub buffer_class: BufferClass,
}

// Fixed total order: array position is the order_index.
pub(crate) const STANDARD_STAGES: &[StageDef] = &[
    StageDef {
        code: "MOB",
        full_name: "Mobilization",
        sector: "pre-construction",
        group: "milestone",
        parent: None,
        buffer_class: BufferClass::Unaffected,
    },
    StageDef {
        code: "LIC",
        full_name: "Licensing and Legal Clearance",
        sector: "pre-construction",
        group: "legal",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "PRJ",
        full_name: "Executive Design",
        sector: "pre-construction",
        group: "design",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "SUP",
        full_name: "Supplier Contracting",
        sector: "pre-construction",
        group: "procurement",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "TER",
        full_name: "Earthworks",
        sector: "infrastructure",
        group: "civil",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "TCF",
        full_name: "Cut and Fill",
        sector: "infrastructure",
        group: "civil",
        parent: Some("TER"),
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "TDR",
        full_name: "Site Drainage",
        sector: "infrastructure",
        group: "civil",
        parent: Some("TER"),
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "FND",
        full_name: "Foundations",
        sector: "infrastructure",
        group: "civil",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "EST",
        full_name: "Structure",
        sector: "superstructure",
        group: "civil",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "ALV",
        full_name: "Masonry",
        sector: "superstructure",
        group: "civil",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "INS",
        full_name: "Building Systems",
        sector: "superstructure",
        group: "systems",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "IEL",
        full_name: "Electrical Installations",
        sector: "superstructure",
        group: "systems",
        parent: Some("INS"),
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "IHS",
        full_name: "Hydro-sanitary Installations",
        sector: "superstructure",
        group: "systems",
        parent: Some("INS"),
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "ACB",
        full_name: "Finishing",
        sector: "superstructure",
        group: "finishing",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "PUL",
        full_name: "Schedule Buffer",
        sector: "closeout",
        group: "buffer",
        parent: None,
        buffer_class: BufferClass::BufferMarker,
    },
    StageDef {
        code: "VIS",
        full_name: "Pre-delivery Inspection",
        sector: "closeout",
        group: "quality",
        parent: None,
        buffer_class: BufferClass::Standard,
    },
    StageDef {
        code: "ENT",
        full_name: "Delivery",
        sector: "closeout",
        group: "milestone",
        parent: None,
        buffer_class: BufferClass::Unaffected,
    },
];
