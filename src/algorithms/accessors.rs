//! Field accessor table
//!
//! For every algorithm family this table lists the fields a parameter may
//! bind to, with their kind and, when the field can be changed on a live
//! instance, a getter and a setter. Fields that can only be chosen when the
//! instance is constructed are listed without accessors.

use super::{AlgorithmFamily, FeatureAlgorithm};
use crate::parameters::value::{ParameterValue, ValueKind};
use std::fmt;

/// Reads a field from an instance; `None` if the instance is of another family
pub type GetFn = fn(&FeatureAlgorithm) -> Option<ParameterValue>;

/// Writes a field of an instance; `false` if the family or value kind does not match
pub type SetFn = fn(&mut FeatureAlgorithm, ParameterValue) -> bool;

/// One named, typed field of an algorithm family
#[derive(Clone, Copy)]
pub struct FieldAccessor {
    pub name: &'static str,
    pub kind: ValueKind,
    pub get: Option<GetFn>,
    pub set: Option<SetFn>,
}

impl fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("gettable", &self.get.is_some())
            .field("settable", &self.set.is_some())
            .finish()
    }
}

macro_rules! field {
    ($variant:ident, $name:literal, $field:ident, $value:ident, $kind:ident) => {
        FieldAccessor {
            name: $name,
            kind: ValueKind::$kind,
            get: Some(|algorithm| match algorithm {
                FeatureAlgorithm::$variant(settings) => Some(ParameterValue::$value(settings.$field)),
                _ => None,
            }),
            set: Some(|algorithm, value| match (algorithm, value) {
                (FeatureAlgorithm::$variant(settings), ParameterValue::$value(v)) => {
                    settings.$field = v;
                    true
                }
                _ => false,
            }),
        }
    };
}

macro_rules! constructor_only {
    ($name:literal, $kind:ident) => {
        FieldAccessor {
            name: $name,
            kind: ValueKind::$kind,
            get: None,
            set: None,
        }
    };
}

static FAST_FIELDS: [FieldAccessor; 3] = [
    field!(Fast, "threshold", threshold, Int, Integer),
    field!(Fast, "nonmaxSuppression", nonmax_suppression, Bool, Boolean),
    constructor_only!("type", Integer),
];

static STAR_FIELDS: [FieldAccessor; 5] = [
    field!(Star, "maxSize", max_size, Int, Integer),
    field!(Star, "responseThreshold", response_threshold, Int, Integer),
    field!(Star, "lineThresholdProjected", line_threshold_projected, Int, Integer),
    field!(Star, "lineThresholdBinarized", line_threshold_binarized, Int, Integer),
    field!(Star, "suppressNonmaxSize", suppress_nonmax_size, Int, Integer),
];

static SIFT_FIELDS: [FieldAccessor; 5] = [
    field!(Sift, "nFeatures", n_features, Int, Integer),
    field!(Sift, "nOctaveLayers", n_octave_layers, Int, Integer),
    field!(Sift, "contrastThreshold", contrast_threshold, Real, Real),
    field!(Sift, "edgeThreshold", edge_threshold, Real, Real),
    field!(Sift, "sigma", sigma, Real, Real),
];

static SURF_FIELDS: [FieldAccessor; 5] = [
    field!(Surf, "hessianThreshold", hessian_threshold, Real, Real),
    field!(Surf, "nOctaves", n_octaves, Int, Integer),
    field!(Surf, "nOctaveLayers", n_octave_layers, Int, Integer),
    field!(Surf, "extended", extended, Bool, Boolean),
    field!(Surf, "upright", upright, Bool, Boolean),
];

static ORB_FIELDS: [FieldAccessor; 8] = [
    field!(Orb, "nFeatures", n_features, Int, Integer),
    field!(Orb, "scaleFactor", scale_factor, Real, Real),
    field!(Orb, "nLevels", n_levels, Int, Integer),
    field!(Orb, "edgeThreshold", edge_threshold, Int, Integer),
    field!(Orb, "firstLevel", first_level, Int, Integer),
    field!(Orb, "WTA_K", wta_k, Int, Integer),
    field!(Orb, "scoreType", score_type, Int, Integer),
    field!(Orb, "patchSize", patch_size, Int, Integer),
];

static BRISK_FIELDS: [FieldAccessor; 3] = [
    constructor_only!("thres", Integer),
    constructor_only!("octaves", Integer),
    constructor_only!("patternScale", Real),
];

static MSER_FIELDS: [FieldAccessor; 9] = [
    field!(Mser, "delta", delta, Int, Integer),
    field!(Mser, "minArea", min_area, Int, Integer),
    field!(Mser, "maxArea", max_area, Int, Integer),
    field!(Mser, "maxVariation", max_variation, Real, Real),
    field!(Mser, "minDiversity", min_diversity, Real, Real),
    field!(Mser, "maxEvolution", max_evolution, Int, Integer),
    field!(Mser, "areaThreshold", area_threshold, Real, Real),
    field!(Mser, "minMargin", min_margin, Real, Real),
    field!(Mser, "edgeBlurSize", edge_blur_size, Int, Integer),
];

static GFTT_FIELDS: [FieldAccessor; 6] = [
    field!(Gftt, "nfeatures", n_features, Int, Integer),
    field!(Gftt, "qualityLevel", quality_level, Real, Real),
    field!(Gftt, "minDistance", min_distance, Real, Real),
    field!(Gftt, "blockSize", block_size, Int, Integer),
    field!(Gftt, "useHarrisDetector", use_harris_detector, Bool, Boolean),
    field!(Gftt, "k", k, Real, Real),
];

static SIMPLE_BLOB_FIELDS: [FieldAccessor; 7] = [
    constructor_only!("thresholdStep", Real),
    constructor_only!("minThreshold", Real),
    constructor_only!("maxThreshold", Real),
    constructor_only!("minDistBetweenBlobs", Real),
    constructor_only!("filterByArea", Boolean),
    constructor_only!("minArea", Real),
    constructor_only!("maxArea", Real),
];

static DENSE_FIELDS: [FieldAccessor; 7] = [
    field!(Dense, "initFeatureScale", init_feature_scale, Real, Real),
    field!(Dense, "featureScaleLevels", feature_scale_levels, Int, Integer),
    field!(Dense, "featureScaleMul", feature_scale_mul, Real, Real),
    field!(Dense, "initXyStep", init_xy_step, Int, Integer),
    field!(Dense, "initImgBound", init_img_bound, Int, Integer),
    field!(Dense, "varyXyStepWithScale", vary_xy_step_with_scale, Bool, Boolean),
    field!(Dense, "varyImgBoundWithScale", vary_img_bound_with_scale, Bool, Boolean),
];

static BRIEF_FIELDS: [FieldAccessor; 1] = [constructor_only!("bytes", Integer)];

static FREAK_FIELDS: [FieldAccessor; 4] = [
    field!(Freak, "orientationNormalized", orientation_normalized, Bool, Boolean),
    field!(Freak, "scaleNormalized", scale_normalized, Bool, Boolean),
    field!(Freak, "patternScale", pattern_scale, Real, Real),
    constructor_only!("nbOctave", Integer),
];

static BF_MATCHER_FIELDS: [FieldAccessor; 2] = [
    constructor_only!("normType", Integer),
    field!(BfMatcher, "crossCheck", cross_check, Bool, Boolean),
];

/// All known fields of a family
pub fn fields(family: AlgorithmFamily) -> &'static [FieldAccessor] {
    match family {
        AlgorithmFamily::Fast => &FAST_FIELDS,
        AlgorithmFamily::Star => &STAR_FIELDS,
        AlgorithmFamily::Sift => &SIFT_FIELDS,
        AlgorithmFamily::Surf => &SURF_FIELDS,
        AlgorithmFamily::Orb => &ORB_FIELDS,
        AlgorithmFamily::Brisk => &BRISK_FIELDS,
        AlgorithmFamily::Mser => &MSER_FIELDS,
        AlgorithmFamily::Gftt => &GFTT_FIELDS,
        AlgorithmFamily::SimpleBlob => &SIMPLE_BLOB_FIELDS,
        AlgorithmFamily::Dense => &DENSE_FIELDS,
        AlgorithmFamily::Brief => &BRIEF_FIELDS,
        AlgorithmFamily::Freak => &FREAK_FIELDS,
        AlgorithmFamily::BfMatcher => &BF_MATCHER_FIELDS,
    }
}

/// Look up the field `name` of kind `kind` in `family`
///
/// Returns `None` when the family has no such field. A returned entry may
/// still lack accessors if the field is constructor-only.
pub fn resolve(family: AlgorithmFamily, name: &str, kind: ValueKind) -> Option<&'static FieldAccessor> {
    fields(family)
        .iter()
        .find(|field| field.name == name && field.kind == kind)
}
