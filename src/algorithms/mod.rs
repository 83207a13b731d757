//! # Algorithm Instances
//!
//! Parameters bind to live algorithm instances owned elsewhere (typically by a
//! feature detection or matching processor). This module models those
//! instances as a closed set of families:
//!
//! - [`AlgorithmFamily`]: the known detector, extractor and matcher families
//! - [`FeatureAlgorithm`]: one instance, carrying the settings of its family
//! - [`SharedAlgorithm`]: how owners hold instances
//! - [`AlgorithmHandle`]: the non-owning reference parameters keep
//! - [`accessors`]: the static `(family, field) -> getter/setter` table
//!
//! Handles never keep an instance alive. Owners should unbind an instance from
//! its parameters before dropping it; a handle whose instance is gone is
//! skipped when values are propagated.

pub mod accessors;
pub mod settings;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

pub use accessors::{resolve, FieldAccessor, GetFn, SetFn};
pub use settings::*;

/// The closed set of algorithm families parameters can bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    Fast,
    Star,
    Sift,
    Surf,
    Orb,
    Brisk,
    Mser,
    Gftt,
    SimpleBlob,
    Dense,
    Brief,
    Freak,
    BfMatcher,
}

impl AlgorithmFamily {
    /// Every family, in the order runtime class names are matched against
    /// family names.
    ///
    /// A family name that is a substring of another family's class name must
    /// come after the more specific one.
    pub const ALL: [AlgorithmFamily; 13] = [
        AlgorithmFamily::BfMatcher,
        AlgorithmFamily::SimpleBlob,
        AlgorithmFamily::Fast,
        AlgorithmFamily::Star,
        AlgorithmFamily::Sift,
        AlgorithmFamily::Surf,
        AlgorithmFamily::Brisk,
        AlgorithmFamily::Orb,
        AlgorithmFamily::Mser,
        AlgorithmFamily::Gftt,
        AlgorithmFamily::Dense,
        AlgorithmFamily::Brief,
        AlgorithmFamily::Freak,
    ];

    /// Name of the parameter set describing this family
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmFamily::Fast => "FAST",
            AlgorithmFamily::Star => "STAR",
            AlgorithmFamily::Sift => "SIFT",
            AlgorithmFamily::Surf => "SURF",
            AlgorithmFamily::Orb => "ORB",
            AlgorithmFamily::Brisk => "BRISK",
            AlgorithmFamily::Mser => "MSER",
            AlgorithmFamily::Gftt => "GFTT",
            AlgorithmFamily::SimpleBlob => "SimpleBlob",
            AlgorithmFamily::Dense => "Dense",
            AlgorithmFamily::Brief => "Brief",
            AlgorithmFamily::Freak => "FREAK",
            AlgorithmFamily::BfMatcher => "BFMatcher",
        }
    }

    /// Runtime class name of instances of this family
    pub fn class_name(&self) -> &'static str {
        match self {
            AlgorithmFamily::Fast => "cv::FastFeatureDetector",
            AlgorithmFamily::Star => "cv::StarDetector",
            AlgorithmFamily::Sift => "cv::SIFT",
            AlgorithmFamily::Surf => "cv::SURF",
            AlgorithmFamily::Orb => "cv::ORB",
            AlgorithmFamily::Brisk => "cv::BRISK",
            AlgorithmFamily::Mser => "cv::MSER",
            AlgorithmFamily::Gftt => "cv::GFTTDetector",
            AlgorithmFamily::SimpleBlob => "cv::SimpleBlobDetector",
            AlgorithmFamily::Dense => "cv::DenseFeatureDetector",
            AlgorithmFamily::Brief => "cv::BriefDescriptorExtractor",
            AlgorithmFamily::Freak => "cv::FREAK",
            AlgorithmFamily::BfMatcher => "cv::BFMatcher",
        }
    }
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive substring test used by the family name heuristics
pub fn name_matches(class_name: &str, family_name: &str) -> bool {
    class_name
        .to_lowercase()
        .contains(&family_name.to_lowercase())
}

/// First family, in [`AlgorithmFamily::ALL`] order, whose name occurs in `class_name`
pub fn family_for_class(class_name: &str) -> Option<AlgorithmFamily> {
    AlgorithmFamily::ALL
        .into_iter()
        .find(|family| name_matches(class_name, family.name()))
}

/// A live algorithm instance
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureAlgorithm {
    Fast(FastSettings),
    Star(StarSettings),
    Sift(SiftSettings),
    Surf(SurfSettings),
    Orb(OrbSettings),
    Brisk(BriskSettings),
    Mser(MserSettings),
    Gftt(GfttSettings),
    SimpleBlob(SimpleBlobSettings),
    Dense(DenseSettings),
    Brief(BriefSettings),
    Freak(FreakSettings),
    BfMatcher(BfMatcherSettings),
}

impl FeatureAlgorithm {
    /// Create an instance of `family` with default settings
    pub fn new(family: AlgorithmFamily) -> Self {
        match family {
            AlgorithmFamily::Fast => FeatureAlgorithm::Fast(FastSettings::default()),
            AlgorithmFamily::Star => FeatureAlgorithm::Star(StarSettings::default()),
            AlgorithmFamily::Sift => FeatureAlgorithm::Sift(SiftSettings::default()),
            AlgorithmFamily::Surf => FeatureAlgorithm::Surf(SurfSettings::default()),
            AlgorithmFamily::Orb => FeatureAlgorithm::Orb(OrbSettings::default()),
            AlgorithmFamily::Brisk => FeatureAlgorithm::Brisk(BriskSettings::default()),
            AlgorithmFamily::Mser => FeatureAlgorithm::Mser(MserSettings::default()),
            AlgorithmFamily::Gftt => FeatureAlgorithm::Gftt(GfttSettings::default()),
            AlgorithmFamily::SimpleBlob => FeatureAlgorithm::SimpleBlob(SimpleBlobSettings::default()),
            AlgorithmFamily::Dense => FeatureAlgorithm::Dense(DenseSettings::default()),
            AlgorithmFamily::Brief => FeatureAlgorithm::Brief(BriefSettings::default()),
            AlgorithmFamily::Freak => FeatureAlgorithm::Freak(FreakSettings::default()),
            AlgorithmFamily::BfMatcher => FeatureAlgorithm::BfMatcher(BfMatcherSettings::default()),
        }
    }

    pub fn family(&self) -> AlgorithmFamily {
        match self {
            FeatureAlgorithm::Fast(_) => AlgorithmFamily::Fast,
            FeatureAlgorithm::Star(_) => AlgorithmFamily::Star,
            FeatureAlgorithm::Sift(_) => AlgorithmFamily::Sift,
            FeatureAlgorithm::Surf(_) => AlgorithmFamily::Surf,
            FeatureAlgorithm::Orb(_) => AlgorithmFamily::Orb,
            FeatureAlgorithm::Brisk(_) => AlgorithmFamily::Brisk,
            FeatureAlgorithm::Mser(_) => AlgorithmFamily::Mser,
            FeatureAlgorithm::Gftt(_) => AlgorithmFamily::Gftt,
            FeatureAlgorithm::SimpleBlob(_) => AlgorithmFamily::SimpleBlob,
            FeatureAlgorithm::Dense(_) => AlgorithmFamily::Dense,
            FeatureAlgorithm::Brief(_) => AlgorithmFamily::Brief,
            FeatureAlgorithm::Freak(_) => AlgorithmFamily::Freak,
            FeatureAlgorithm::BfMatcher(_) => AlgorithmFamily::BfMatcher,
        }
    }

    /// Runtime class name of this instance
    pub fn class_name(&self) -> &'static str {
        self.family().class_name()
    }

    /// Wrap the instance for shared ownership
    pub fn into_shared(self) -> SharedAlgorithm {
        Arc::new(Mutex::new(self))
    }
}

/// How processors own algorithm instances
pub type SharedAlgorithm = Arc<Mutex<FeatureAlgorithm>>;

/// Non-owning reference to a [`SharedAlgorithm`]
///
/// Two handles are equal when they refer to the same instance.
#[derive(Clone, Default)]
pub struct AlgorithmHandle {
    inner: Weak<Mutex<FeatureAlgorithm>>,
}

impl AlgorithmHandle {
    pub fn new(algorithm: &SharedAlgorithm) -> Self {
        Self {
            inner: Arc::downgrade(algorithm),
        }
    }

    /// A handle referring to nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when the handle refers to no live instance
    pub fn is_empty(&self) -> bool {
        self.inner.strong_count() == 0
    }

    /// Address of the referenced instance, used for identity and display
    pub fn address(&self) -> usize {
        self.inner.as_ptr() as *const () as usize
    }

    pub fn upgrade(&self) -> Option<SharedAlgorithm> {
        self.inner.upgrade()
    }

    /// Family of the referenced instance, if it is still alive
    pub fn family(&self) -> Option<AlgorithmFamily> {
        self.with_algorithm(|algorithm| algorithm.family())
    }

    /// Class name of the referenced instance, if it is still alive
    pub fn class_name(&self) -> Option<&'static str> {
        self.family().map(|family| family.class_name())
    }

    /// Run `f` on the referenced instance while holding its lock
    ///
    /// Returns `None` when the instance has been dropped.
    pub fn with_algorithm<R>(&self, f: impl FnOnce(&mut FeatureAlgorithm) -> R) -> Option<R> {
        let algorithm = self.inner.upgrade()?;
        let mut guard = lock_recovering(&algorithm);
        Some(f(&mut *guard))
    }
}

// Settings carry no cross-field invariants, so a poisoned lock is still usable.
fn lock_recovering(algorithm: &Mutex<FeatureAlgorithm>) -> MutexGuard<'_, FeatureAlgorithm> {
    match algorithm.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl From<&SharedAlgorithm> for AlgorithmHandle {
    fn from(algorithm: &SharedAlgorithm) -> Self {
        Self::new(algorithm)
    }
}

impl PartialEq for AlgorithmHandle {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for AlgorithmHandle {}

impl fmt::Debug for AlgorithmHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlgorithmHandle({:#x})", self.address())
    }
}

impl fmt::Display for AlgorithmHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.address())
    }
}
