//! Per-family detector settings
//!
//! Each struct mirrors the tunable state of one feature detector, descriptor
//! extractor or matcher family. Defaults follow the usual OpenCV defaults.

#[derive(Debug, Clone, PartialEq)]
pub struct FastSettings {
    pub threshold: i32,
    pub nonmax_suppression: bool,
    pub detector_type: i32,
}

impl Default for FastSettings {
    fn default() -> Self {
        Self {
            threshold: 10,
            nonmax_suppression: true,
            detector_type: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarSettings {
    pub max_size: i32,
    pub response_threshold: i32,
    pub line_threshold_projected: i32,
    pub line_threshold_binarized: i32,
    pub suppress_nonmax_size: i32,
}

impl Default for StarSettings {
    fn default() -> Self {
        Self {
            max_size: 45,
            response_threshold: 30,
            line_threshold_projected: 10,
            line_threshold_binarized: 8,
            suppress_nonmax_size: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiftSettings {
    pub n_features: i32,
    pub n_octave_layers: i32,
    pub contrast_threshold: f64,
    pub edge_threshold: f64,
    pub sigma: f64,
}

impl Default for SiftSettings {
    fn default() -> Self {
        Self {
            n_features: 0,
            n_octave_layers: 3,
            contrast_threshold: 0.04,
            edge_threshold: 10.0,
            sigma: 1.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfSettings {
    pub hessian_threshold: f64,
    pub n_octaves: i32,
    pub n_octave_layers: i32,
    pub extended: bool,
    pub upright: bool,
}

impl Default for SurfSettings {
    fn default() -> Self {
        Self {
            hessian_threshold: 100.0,
            n_octaves: 4,
            n_octave_layers: 2,
            extended: true,
            upright: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbSettings {
    pub n_features: i32,
    pub scale_factor: f64,
    pub n_levels: i32,
    pub edge_threshold: i32,
    pub first_level: i32,
    pub wta_k: i32,
    pub score_type: i32,
    pub patch_size: i32,
}

impl Default for OrbSettings {
    fn default() -> Self {
        Self {
            n_features: 500,
            scale_factor: 1.2,
            n_levels: 8,
            edge_threshold: 31,
            first_level: 0,
            wta_k: 2,
            score_type: 0,
            patch_size: 31,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BriskSettings {
    pub thresh: i32,
    pub octaves: i32,
    pub pattern_scale: f64,
}

impl Default for BriskSettings {
    fn default() -> Self {
        Self {
            thresh: 30,
            octaves: 3,
            pattern_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MserSettings {
    pub delta: i32,
    pub min_area: i32,
    pub max_area: i32,
    pub max_variation: f64,
    pub min_diversity: f64,
    pub max_evolution: i32,
    pub area_threshold: f64,
    pub min_margin: f64,
    pub edge_blur_size: i32,
}

impl Default for MserSettings {
    fn default() -> Self {
        Self {
            delta: 5,
            min_area: 60,
            max_area: 14400,
            max_variation: 0.25,
            min_diversity: 0.2,
            max_evolution: 200,
            area_threshold: 1.01,
            min_margin: 0.003,
            edge_blur_size: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GfttSettings {
    pub n_features: i32,
    pub quality_level: f64,
    pub min_distance: f64,
    pub block_size: i32,
    pub use_harris_detector: bool,
    pub k: f64,
}

impl Default for GfttSettings {
    fn default() -> Self {
        Self {
            n_features: 1000,
            quality_level: 0.01,
            min_distance: 1.0,
            block_size: 3,
            use_harris_detector: false,
            k: 0.04,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBlobSettings {
    pub threshold_step: f64,
    pub min_threshold: f64,
    pub max_threshold: f64,
    pub min_dist_between_blobs: f64,
    pub filter_by_area: bool,
    pub min_area: f64,
    pub max_area: f64,
}

impl Default for SimpleBlobSettings {
    fn default() -> Self {
        Self {
            threshold_step: 10.0,
            min_threshold: 50.0,
            max_threshold: 220.0,
            min_dist_between_blobs: 10.0,
            filter_by_area: true,
            min_area: 25.0,
            max_area: 5000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DenseSettings {
    pub init_feature_scale: f64,
    pub feature_scale_levels: i32,
    pub feature_scale_mul: f64,
    pub init_xy_step: i32,
    pub init_img_bound: i32,
    pub vary_xy_step_with_scale: bool,
    pub vary_img_bound_with_scale: bool,
}

impl Default for DenseSettings {
    fn default() -> Self {
        Self {
            init_feature_scale: 1.0,
            feature_scale_levels: 1,
            feature_scale_mul: 0.1,
            init_xy_step: 6,
            init_img_bound: 0,
            vary_xy_step_with_scale: true,
            vary_img_bound_with_scale: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BriefSettings {
    pub bytes: i32,
}

impl Default for BriefSettings {
    fn default() -> Self {
        Self { bytes: 32 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreakSettings {
    pub orientation_normalized: bool,
    pub scale_normalized: bool,
    pub pattern_scale: f64,
    pub n_octaves: i32,
}

impl Default for FreakSettings {
    fn default() -> Self {
        Self {
            orientation_normalized: true,
            scale_normalized: true,
            pattern_scale: 22.0,
            n_octaves: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BfMatcherSettings {
    pub norm_type: i32,
    pub cross_check: bool,
}

impl Default for BfMatcherSettings {
    fn default() -> Self {
        // NORM_L2
        Self {
            norm_type: 4,
            cross_check: false,
        }
    }
}
