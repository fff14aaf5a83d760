// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration.
//!
//! [`CloudConfig`] carries the screen and lattice dimensions, and [`Tuning`]
//! carries every empirically tuned constant of the warp, edge, and motion
//! curves. Both are plain `Copy` values fixed for the lifetime of a
//! [`BubbleCloud`](crate::cloud::BubbleCloud).

use kurbo::Vec2;

use crate::error::{Error, Result};
use crate::lattice::MAX_RINGS;
use crate::time::Duration;

/// Empirically tuned curve constants.
///
/// The x/y asymmetries (corner band start values, reflow magnitudes) are
/// part of the look and are kept as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    /// Swing ease start value for the sphere-warp radius factor.
    pub swing_start: f64,
    /// Swing ease change for the sphere-warp radius factor.
    pub swing_change: f64,
    /// Cubic ease start value for sphere depth.
    pub depth_start: f64,
    /// Cubic ease change for sphere depth.
    pub depth_change: f64,
    /// Vertical aspect correction applied after rounding.
    pub y_aspect: f64,
    /// Scale factor applied to depth outside the outer edge band.
    pub outer_scale: f64,
    /// Ease start value inside a single-axis edge band.
    pub band_start: f64,
    /// Ease change inside a single-axis edge band.
    pub band_change: f64,
    /// Ease start value on the y axis inside the corner band.
    pub corner_y_start: f64,
    /// Ease change on the y axis inside the corner band.
    pub corner_y_change: f64,
    /// Maximum inward push near the left/right edges.
    pub reflow_x: f64,
    /// Maximum inward push near the top/bottom edges.
    pub reflow_y: f64,
    /// Fraction of movement past the scroll range that is kept while dragging.
    pub drag_damping: f64,
    /// Fraction of the overshoot removed after each inertial step.
    pub inertia_relax: f64,
    /// Pointer travel (per axis) that turns a click into a scroll.
    pub touch_slop: f64,
    /// Multiplier from the last drag delta to the inertial distance.
    pub inertia_gain: f64,
    /// Length of an inertial run.
    pub inertia_duration: Duration,
    /// Number of discrete steps in an inertial run.
    pub inertia_steps: u32,
    /// Length of the entry animation.
    pub entry_duration: Duration,
    /// Number of discrete steps in the entry animation.
    pub entry_steps: u32,
    /// Extra hex spacing the entry animation starts from.
    pub entry_spacing_offset: f64,
}

impl Tuning {
    /// The reference tuning.
    pub const DEFAULT: Self = Self {
        swing_start: 1.5,
        swing_change: -0.5,
        depth_start: 1.0,
        depth_change: -0.5,
        y_aspect: 1.14,
        outer_scale: 0.4,
        band_start: 0.4,
        band_change: 0.6,
        corner_y_start: 0.3,
        corner_y_change: 0.7,
        reflow_x: 6.0,
        reflow_y: 8.0,
        drag_damping: 0.5,
        inertia_relax: 0.25,
        touch_slop: 10.0,
        inertia_gain: 10.0,
        inertia_duration: Duration::from_millis(300),
        inertia_steps: 16,
        entry_duration: Duration::from_millis(1000),
        entry_steps: 36,
        entry_spacing_offset: 100.0,
    };
}

impl Default for Tuning {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for a [`BubbleCloud`](crate::cloud::BubbleCloud).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudConfig {
    /// Width of the visible cloud area.
    pub screen_width: f64,
    /// Height of the visible cloud area.
    pub screen_height: f64,
    /// Radius of the virtual sphere the lattice is wrapped on.
    pub sphere_radius: f64,
    /// Resting distance between neighbouring cells.
    pub hex_radius: f64,
    /// Side length of one item's square.
    pub item_size: f64,
    /// Width of each shrink band at the screen edges. Must be positive.
    pub edge_margin: f64,
    /// Pan offset per axis past which dragging is damped.
    pub scroll_range: Vec2,
    /// Minimum number of hexagonal rings in the lattice, at most
    /// [`MAX_RINGS`].
    pub rings: u32,
    /// Curve constants.
    pub tuning: Tuning,
}

impl CloudConfig {
    /// Creates a configuration for a `width` × `height` area using the
    /// reference proportions.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            sphere_radius: 500.0,
            hex_radius: 100.0,
            item_size: 80.0,
            edge_margin: 50.0,
            scroll_range: Vec2::new(30.0, 10.0),
            rings: 4,
            tuning: Tuning::DEFAULT,
        }
    }

    /// Checks every field, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("sphere_radius", self.sphere_radius)?;
        positive("hex_radius", self.hex_radius)?;
        non_negative("item_size", self.item_size)?;
        positive("edge_margin", self.edge_margin)?;
        non_negative("scroll_range.x", self.scroll_range.x)?;
        non_negative("scroll_range.y", self.scroll_range.y)?;
        if self.rings == 0 {
            return Err(Error::InvalidConfiguration {
                field: "rings",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.rings > MAX_RINGS {
            return Err(Error::InvalidConfiguration {
                field: "rings",
                value: f64::from(self.rings),
                reason: "exceeds the lattice ring limit",
            });
        }
        let t = &self.tuning;
        non_negative("tuning.touch_slop", t.touch_slop)?;
        non_negative("tuning.entry_spacing_offset", t.entry_spacing_offset)?;
        if !(0.0..=1.0).contains(&t.drag_damping) {
            return Err(Error::InvalidConfiguration {
                field: "tuning.drag_damping",
                value: t.drag_damping,
                reason: "must lie in [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&t.inertia_relax) {
            return Err(Error::InvalidConfiguration {
                field: "tuning.inertia_relax",
                value: t.inertia_relax,
                reason: "must lie in [0, 1]",
            });
        }
        if t.inertia_steps == 0 {
            return Err(Error::InvalidConfiguration {
                field: "tuning.inertia_steps",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if t.entry_steps == 0 {
            return Err(Error::InvalidConfiguration {
                field: "tuning.entry_steps",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Half the screen size, i.e. the distance from the cloud centre to each
    /// edge.
    #[inline]
    #[must_use]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self::new(1000.0, 1000.0)
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            field,
            value,
            reason: "must be positive and finite",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            field,
            value,
            reason: "must be non-negative and finite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_config_is_valid() {
        assert_eq!(CloudConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let cases: [(&str, fn(&mut CloudConfig)); 4] = [
            ("screen_width", |c| c.screen_width = 0.0),
            ("screen_height", |c| c.screen_height = -3.0),
            ("sphere_radius", |c| c.sphere_radius = f64::NAN),
            ("hex_radius", |c| c.hex_radius = f64::INFINITY),
        ];
        for (name, mutate) in cases {
            let mut config = CloudConfig::default();
            mutate(&mut config);
            match config.validate() {
                Err(Error::InvalidConfiguration { field, .. }) => {
                    assert_eq!(field, name, "wrong field reported");
                }
                other => panic!("{name}: expected InvalidConfiguration, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_zero_rings_and_steps() {
        let mut config = CloudConfig::default();
        config.rings = 0;
        assert!(config.validate().is_err());

        let mut config = CloudConfig::default();
        config.tuning.inertia_steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_range_is_allowed() {
        let mut config = CloudConfig::default();
        config.scroll_range = Vec2::ZERO;
        config.item_size = 0.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_edge_margin() {
        // The edge bands divide by the margin width.
        let mut config = CloudConfig::default();
        config.edge_margin = 0.0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration {
                field: "edge_margin",
                ..
            })
        ));
    }

    #[test]
    fn rings_are_capped() {
        let mut config = CloudConfig::default();
        config.rings = MAX_RINGS;
        assert_eq!(config.validate(), Ok(()));
        config.rings = MAX_RINGS + 1;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { field: "rings", .. })
        ));
    }

    #[test]
    fn half_extent_is_half_the_screen() {
        let config = CloudConfig::new(800.0, 600.0);
        assert_eq!(config.half_extent(), Vec2::new(400.0, 300.0));
    }
}
