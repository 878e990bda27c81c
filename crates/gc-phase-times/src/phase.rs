//! GC Parallel Phases
//!
//! Closed set of root-processing sub-phases timed per worker.
//! Each phase indexes a dense slot in the registry, so adding a phase
//! only means adding a variant here and bumping `COUNT`.

use crate::error::PhaseTimesError;
use std::fmt;
use std::str::FromStr;

/// Root-processing sub-phase of a parallel GC cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GcParPhase {
    ThreadRoots,
    CodeCacheRoots,
    StringTableRoots,
    UniverseRoots,
    JNIRoots,
    JNIWeakRoots,
    ObjectSynchronizerRoots,
    FlatProfilerRoots,
    ManagementRoots,
    SystemDictionaryRoots,
    /// Class loader data graph roots
    CLDGRoots,
    JVMTIRoots,
}

impl GcParPhase {
    /// Number of phases. Sizes the registry; never a phase itself.
    pub const COUNT: usize = 12;

    /// All phases in declaration order
    pub const ALL: [GcParPhase; GcParPhase::COUNT] = [
        GcParPhase::ThreadRoots,
        GcParPhase::CodeCacheRoots,
        GcParPhase::StringTableRoots,
        GcParPhase::UniverseRoots,
        GcParPhase::JNIRoots,
        GcParPhase::JNIWeakRoots,
        GcParPhase::ObjectSynchronizerRoots,
        GcParPhase::FlatProfilerRoots,
        GcParPhase::ManagementRoots,
        GcParPhase::SystemDictionaryRoots,
        GcParPhase::CLDGRoots,
        GcParPhase::JVMTIRoots,
    ];

    /// Dense index in `[0, COUNT)`
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Iterate phases in declaration order
    pub fn iter() -> impl Iterator<Item = GcParPhase> {
        Self::ALL.into_iter()
    }

    /// Label used when printing
    pub const fn name(self) -> &'static str {
        match self {
            GcParPhase::ThreadRoots => "Thread Roots",
            GcParPhase::CodeCacheRoots => "CodeCache Roots",
            GcParPhase::StringTableRoots => "StringTable Roots",
            GcParPhase::UniverseRoots => "Universe Roots",
            GcParPhase::JNIRoots => "JNI Handles Roots",
            GcParPhase::JNIWeakRoots => "JNI Weak Roots",
            GcParPhase::ObjectSynchronizerRoots => "ObjectSynchronizer Roots",
            GcParPhase::FlatProfilerRoots => "FlatProfiler Roots",
            GcParPhase::ManagementRoots => "Management Roots",
            GcParPhase::SystemDictionaryRoots => "SystemDictionary Roots",
            GcParPhase::CLDGRoots => "CLDG Roots",
            GcParPhase::JVMTIRoots => "JVMTI Roots",
        }
    }

    /// Variant identifier, e.g. `"ThreadRoots"`
    pub const fn ident(self) -> &'static str {
        match self {
            GcParPhase::ThreadRoots => "ThreadRoots",
            GcParPhase::CodeCacheRoots => "CodeCacheRoots",
            GcParPhase::StringTableRoots => "StringTableRoots",
            GcParPhase::UniverseRoots => "UniverseRoots",
            GcParPhase::JNIRoots => "JNIRoots",
            GcParPhase::JNIWeakRoots => "JNIWeakRoots",
            GcParPhase::ObjectSynchronizerRoots => "ObjectSynchronizerRoots",
            GcParPhase::FlatProfilerRoots => "FlatProfilerRoots",
            GcParPhase::ManagementRoots => "ManagementRoots",
            GcParPhase::SystemDictionaryRoots => "SystemDictionaryRoots",
            GcParPhase::CLDGRoots => "CLDGRoots",
            GcParPhase::JVMTIRoots => "JVMTIRoots",
        }
    }

    /// snake_case form for metric names
    pub fn metric_name(self) -> String {
        let mut out = String::with_capacity(self.ident().len() + 4);
        let chars: Vec<char> = self.ident().chars().collect();

        for (i, &c) in chars.iter().enumerate() {
            if c.is_ascii_uppercase() {
                // Break before an uppercase letter that starts a new word:
                // after a lowercase letter, or at the end of an acronym run.
                let prev_lower = i > 0 && chars[i - 1].is_ascii_lowercase();
                let acronym_end = i > 0
                    && chars[i - 1].is_ascii_uppercase()
                    && chars.get(i + 1).map_or(false, |n| n.is_ascii_lowercase());
                if prev_lower || acronym_end {
                    out.push('_');
                }
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
        }

        out
    }
}

impl fmt::Display for GcParPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GcParPhase {
    type Err = PhaseTimesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|phase| phase.ident() == s || phase.name() == s)
            .ok_or_else(|| PhaseTimesError::UnknownPhase(s.to_string()))
    }
}
