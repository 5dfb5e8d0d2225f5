//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the engine. They are plain
//! `f64` newtypes that serialize as bare numbers.
//!
//! ## Internal Units
//!
//! The fiber integration runs in N and N·mm (MPa × mm² = N) and converts to
//! the reporting units at the boundary:
//! - Length: millimeters (mm), kept as plain `f64` with an `_mm` suffix
//! - Stress: megapascals (MPa = N/mm²)
//! - Force: newtons (N) internally, kilonewtons (kN) in results
//! - Moment: newton-millimeters (N·mm) internally, kilonewton-meters (kN·m) in results
//!
//! Stresses given in kgf/cm² (common in Latin American practice) convert
//! through [`KgfPerCm2`].
//!
//! ## Example
//!
//! ```rust
//! use wallcap_core::units::{KilonewtonMeters, Kilonewtons, NewtonMillimeters, Newtons};
//!
//! let force: Kilonewtons = Newtons(1_250_000.0).into();
//! assert_eq!(force.0, 1250.0);
//!
//! let moment: KilonewtonMeters = NewtonMillimeters(3.0e8).into();
//! assert_eq!(moment.0, 300.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Standard gravity used for kgf conversions (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.806_65;

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMillimeters> for KilonewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KilonewtonMeters(nmm.0 / 1.0e6)
    }
}

impl From<KilonewtonMeters> for NewtonMillimeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Stress in kilogram-force per square centimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgfPerCm2(pub f64);

impl From<KgfPerCm2> for Megapascals {
    fn from(kgf: KgfPerCm2) -> Self {
        // 1 kgf/cm² = 9.80665 N / 100 mm²
        Megapascals(kgf.0 * STANDARD_GRAVITY / 100.0)
    }
}

impl From<Megapascals> for KgfPerCm2 {
    fn from(mpa: Megapascals) -> Self {
        KgfPerCm2(mpa.0 * 100.0 / STANDARD_GRAVITY)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Newtons);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(KilonewtonMeters);
impl_arithmetic!(Megapascals);
impl_arithmetic!(KgfPerCm2);
