//! Parameter introspection for discoverable effect parameters.
//!
//! Provides the [`ParameterInfo`] trait and supporting types that let hosts,
//! the CLI, and preset code discover and set an effect's parameters without
//! knowing its concrete type.
//!
//! # Design
//!
//! Parameters are addressed by zero-based index. Each one is described by a
//! [`ParamDescriptor`] carrying display metadata, range, a stable
//! [`ParamId`], a [`ParamScale`] control curve, and [`ParamFlags`].
//!
//! # Example
//!
//! ```rust
//! use lofi_core::{ParameterInfo, ParamDescriptor, ParamId, ParamUnit};
//!
//! struct SimpleGain {
//!     gain: f32,
//! }
//!
//! impl ParameterInfo for SimpleGain {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::new("Gain", "Gain", ParamUnit::Ratio, 0.0, 2.0, 1.0)
//!                 .with_id(ParamId(900), "gain_level")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain = value.clamp(0.0, 2.0);
//!         }
//!     }
//! }
//!
//! let mut g = SimpleGain { gain: 1.0 };
//! assert_eq!(g.find_param_by_name("gain"), Some(0));
//! assert_eq!(g.param_index_by_id(ParamId(900)), Some(0));
//! g.set_param(0, 5.0);
//! assert_eq!(g.get_param(0), 2.0);
//! ```

use alloc::format;
use alloc::string::String;

/// Control curve a host should use when mapping a knob onto the range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default).
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values; `min` must be positive.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` never changes for a given parameter; presets
/// and automation refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// ```rust
/// use lofi_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::INERT));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete integer steps.
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter is accepted and stored but does not change the audio.
    pub const INERT: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// Indices are stable for the lifetime of an effect instance. `set_param`
/// applies the effect's own range rules; out-of-range indices are ignored
/// and `get_param` returns `0.0` for them.
pub trait ParameterInfo {
    /// Returns the number of parameters this effect exposes.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at `index`, or `None`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at `index`.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches the full name, the short name, and the string ID.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// O(n) scan, meant for setup paths.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit type for formatting.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Default value at construction.
    pub default: f32,
    /// Recommended step increment for encoder-style control.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Human-readable stable ID, e.g. `"ds_rate"`.
    pub string_id: &'static str,
    /// Control curve.
    pub scale: ParamScale,
    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Automatable linear parameter with the given name, unit and range.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// ```rust
    /// use lofi_core::{ParamDescriptor, ParamId, ParamUnit};
    ///
    /// let desc = ParamDescriptor::new("Rate", "Rate", ParamUnit::Ratio, 0.0, 1.0, 1.0)
    ///     .with_id(ParamId(100), "ds_rate");
    /// assert_eq!(desc.id, ParamId(100));
    /// assert_eq!(desc.string_id, "ds_rate");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the control curve.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamps a value to this parameter's valid range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Formats a value for display, including the unit suffix.
    ///
    /// Stepped parameters print as integers. Magnitudes below `1e-3` switch
    /// to scientific notation so they keep their significant digits.
    ///
    /// ```rust
    /// use lofi_core::{ParamDescriptor, ParamUnit};
    ///
    /// let rate = ParamDescriptor::new("Rate", "Rate", ParamUnit::Ratio, 1e-6, 1.0, 1.0);
    /// assert_eq!(rate.format_value(0.25), "0.2500x");
    /// assert_eq!(rate.format_value(1e-6), "1.0000e-6x");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        let suffix = self.unit.suffix();
        if self.flags.contains(ParamFlags::STEPPED) {
            format!("{}{}", libm::truncf(value) as i64, suffix)
        } else if value != 0.0 && libm::fabsf(value) < 1e-3 {
            format!("{:.4e}{}", value, suffix)
        } else {
            format!("{:.4}{}", value, suffix)
        }
    }

    /// Parses display text back into a value, ignoring a trailing unit suffix.
    ///
    /// Accepts anything [`format_value`](Self::format_value) prints. The
    /// result is not clamped.
    pub fn parse_value(&self, text: &str) -> Option<f32> {
        let trimmed = text.trim();
        let suffix = self.unit.suffix().trim();
        let number = if suffix.is_empty() {
            trimmed
        } else {
            trimmed.strip_suffix(suffix).unwrap_or(trimmed).trim()
        };
        number.parse::<f32>().ok()
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Samples.
    Samples,
    /// Ratio of the native sample rate (`x`).
    Ratio,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use lofi_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Samples.suffix(), " smp");
    /// assert_eq!(ParamUnit::Ratio.suffix(), "x");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Samples => " smp",
            ParamUnit::Ratio => "x",
        }
    }
}
