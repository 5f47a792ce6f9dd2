//! Per-criterion reason bits for object-quality decisions.
//!
//! Each selector reports, alongside its overall pass/fail verdict, one bit
//! per criterion it evaluated. The bits identify which criteria an object
//! satisfied, so a failing object can be attributed to a specific criterion
//! in efficiency studies.

use bitflags::bitflags;

bitflags! {
    /// Criteria of the jet identification selector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct JetQualityBits: u8 {
        const NEUTRAL_HADRON_FRACTION = 1 << 0;
        const NEUTRAL_EM_FRACTION = 1 << 1;
        const CHARGED_HADRON_FRACTION = 1 << 2;
        const CHARGED_EM_FRACTION = 1 << 3;
        const CONSTITUENT_COUNT = 1 << 4;
        const CHARGED_MULTIPLICITY = 1 << 5;
    }
}

bitflags! {
    /// Criteria of the muon identification selector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MuonQualityBits: u8 {
        const GLOBAL = 1 << 0;
        const NORMALIZED_CHI2 = 1 << 1;
        const VALID_MUON_HITS = 1 << 2;
        const MATCHED_STATIONS = 1 << 3;
        const IMPACT_PARAMETER = 1 << 4;
        const ISOLATION = 1 << 5;
    }
}

bitflags! {
    /// Criteria of the electron identification selector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ElectronQualityBits: u8 {
        const ID_SCORE = 1 << 0;
        const MISSING_INNER_HITS = 1 << 1;
        const ISOLATION = 1 << 2;
        const CONVERSION_VETO = 1 << 3;
    }
}

bitflags! {
    /// Criteria of the primary-vertex goodness selector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VertexQualityBits: u8 {
        const NOT_FAKE = 1 << 0;
        const NDOF = 1 << 1;
        const Z_POSITION = 1 << 2;
        const RHO = 1 << 3;
    }
}

/// Verdict of a quality selector: overall pass/fail plus the per-criterion
/// bits that were satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityCheck<B> {
    pub passed: bool,
    pub bits: B,
}

impl<B> QualityCheck<B> {
    pub fn new(passed: bool, bits: B) -> Self {
        Self { passed, bits }
    }
}
