//! Two-layer heat grid over the simulation plane
//!
//! The grid holds a transient fire-source field, rebuilt every tick from the
//! burning plants, and a persistent heat-transfer field that accumulates
//! radiation, is pushed around by wind, and decays over time. Plants read the
//! heat-transfer field to decide whether they ignite.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────┐  border rows/columns absorb contributions
//! │ b b b b b b b b b b b b b b b│  from edge cells and are never sampled
//! │ b ┌────────────────────────┐ b│
//! │ b │ interior: resolution_x │ b│  interior x ∈ [border, border + resolution_x)
//! │ b │        × resolution_y  │ b│  interior y ∈ [border, border + resolution_y)
//! │ b └────────────────────────┘ b│
//! │ b b b b b b b b b b b b b b b│
//! └──────────────────────────────┘
//! ```
//!
//! Grid x follows world X and grid y follows world Z.

use super::bounds::SimulationBounds;
use super::field::ScalarField;
use super::heat_transfer::{
    advect_cpu, dissipate_cpu, radiate_sources_cpu, AdvectionParams, CellSpacing, Interior,
    RadiationParams,
};
use crate::core_types::{CellIndex, Vec3};
use crate::error::{Axis, ConfigError};
use crate::weather::WindOutcome;
use tracing::trace;

/// Heat grid with border padding
#[derive(Debug, Clone)]
pub struct HeatGrid {
    fire_source: ScalarField,
    heat: ScalarField,
    /// Flat indices of cells stamped this tick, in stamping order
    sources: Vec<usize>,
    resolution_x: usize,
    resolution_y: usize,
    border: usize,
    bounds: SimulationBounds,
    spacing: CellSpacing,
}

impl HeatGrid {
    /// Allocate a zeroed grid covering `bounds`
    ///
    /// # Arguments
    ///
    /// * `resolution_x` - Interior cells along world X
    /// * `resolution_y` - Interior cells along world Z
    /// * `border` - Padding cells on every side (at least 1)
    /// * `bounds` - World-space box mapped onto the interior
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for zero resolution, zero border, or
    /// degenerate bounds.
    pub fn new(
        resolution_x: usize,
        resolution_y: usize,
        border: usize,
        bounds: SimulationBounds,
    ) -> Result<Self, ConfigError> {
        if resolution_x == 0 {
            return Err(ConfigError::ZeroResolution { axis: Axis::X });
        }
        if resolution_y == 0 {
            return Err(ConfigError::ZeroResolution { axis: Axis::Z });
        }
        if border == 0 {
            return Err(ConfigError::ZeroBorder);
        }
        bounds.validate()?;

        let width = resolution_x + 2 * border;
        let height = resolution_y + 2 * border;
        let size = bounds.size();

        Ok(Self {
            fire_source: ScalarField::new(width, height),
            heat: ScalarField::new(width, height),
            sources: Vec::new(),
            resolution_x,
            resolution_y,
            border,
            bounds,
            spacing: CellSpacing::new(size.x / resolution_x as f32, size.z / resolution_y as f32),
        })
    }

    /// Padded `(width, height)` in cells
    pub fn dimensions(&self) -> (usize, usize) {
        (self.heat.width(), self.heat.height())
    }

    /// Interior `(resolution_x, resolution_y)`
    pub fn resolution(&self) -> (usize, usize) {
        (self.resolution_x, self.resolution_y)
    }

    pub fn border(&self) -> usize {
        self.border
    }

    pub fn bounds(&self) -> &SimulationBounds {
        &self.bounds
    }

    /// Physical spacing between cell centers
    pub fn spacing(&self) -> CellSpacing {
        self.spacing
    }

    /// Whether `(ix, iy)` lies inside the interior
    pub fn is_interior(&self, ix: usize, iy: usize) -> bool {
        (self.border..self.border + self.resolution_x).contains(&ix)
            && (self.border..self.border + self.resolution_y).contains(&iy)
    }

    fn interior(&self) -> Interior {
        let (width, height) = self.dimensions();
        Interior {
            width,
            height,
            border: self.border,
        }
    }

    /// Continuous padded-grid coordinate of a world position
    ///
    /// Integer parts select the cell; the fractional part is the offset from
    /// the cell's lower corner.
    pub fn continuous_coords(&self, position: &Vec3) -> (f32, f32) {
        let b = self.border as f32;
        (
            (position.x - self.bounds.min.x) / self.spacing.dx + b,
            (position.z - self.bounds.min.z) / self.spacing.dz + b,
        )
    }

    /// Interior cell containing a world position
    ///
    /// Positions on or past the max face clamp to the last interior cell, so
    /// the result is always a valid interior index.
    pub fn cell_of(&self, position: &Vec3) -> CellIndex {
        let (cx, cy) = self.continuous_coords(position);
        CellIndex::new(
            self.clamp_axis(cx, self.resolution_x),
            self.clamp_axis(cy, self.resolution_y),
        )
    }

    fn clamp_axis(&self, coord: f32, resolution: usize) -> usize {
        let first = self.border as f32;
        let last = (self.border + resolution - 1) as f32;
        // NaN falls through clamp; treat it as the first cell
        let c = if coord.is_nan() { first } else { coord.clamp(first, last) };
        c.floor() as usize
    }

    /// Zero the fire-source field over its full padded extent
    pub fn reset_sources(&mut self) {
        self.fire_source.fill(0.0);
        self.sources.clear();
    }

    /// Stamp a fire source with max-semantics
    ///
    /// Re-stamping a cell at an equal or lower temperature has no effect.
    /// Cells outside the interior are ignored: their neighbors would fall
    /// off the padded grid during radiation.
    pub fn stamp_source(&mut self, ix: usize, iy: usize, temperature: f32) {
        if !self.is_interior(ix, iy) {
            trace!(ix, iy, "Ignoring stamp outside the interior");
            return;
        }
        let current = self.fire_source.get(ix, iy);
        if current >= temperature {
            return;
        }
        if current <= 0.0 {
            self.sources.push(self.fire_source.index(ix, iy));
        }
        self.fire_source.set(ix, iy, temperature);
    }

    /// Number of distinct source cells stamped since the last reset
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Radiate every stamped source into its 8 neighbors
    pub fn radiate(&mut self, dt: f32) {
        let params = RadiationParams {
            dt,
            width: self.fire_source.width(),
            spacing: self.spacing,
        };
        radiate_sources_cpu(
            self.fire_source.as_slice(),
            self.heat.as_mut_slice(),
            &self.sources,
            params,
        );
    }

    /// Lower every interior cell by `decay_rate * dt`, floored at zero
    pub fn dissipate(&mut self, dt: f32, decay_rate: f32) {
        let interior = self.interior();
        dissipate_cpu(self.heat.as_mut_slice(), interior, decay_rate * dt);
    }

    /// Advect heat along the quantized wind direction
    ///
    /// When the propagation vector has no lateral offset, this dissipates
    /// instead and reports [`WindOutcome::Dissipated`].
    pub fn advect_wind(&mut self, propagation: &Vec3, dt: f32, decay_rate: f32) -> WindOutcome {
        let outcome = WindOutcome::project(propagation);
        match outcome {
            WindOutcome::Dissipated => self.dissipate(dt, decay_rate),
            WindOutcome::Advected {
                offset_x,
                offset_y,
                multiplier,
            } => {
                trace!(offset_x, offset_y, multiplier, "Advecting heat");
                let interior = self.interior();
                advect_cpu(
                    self.heat.as_mut_slice(),
                    interior,
                    AdvectionParams {
                        dt,
                        offset_x,
                        offset_y,
                        multiplier,
                    },
                );
            }
        }
        outcome
    }

    /// Heat at a cell; O(1)
    pub fn sample_nearest(&self, ix: usize, iy: usize) -> f32 {
        self.heat.get(ix, iy)
    }

    /// Heat interpolated between the 4 cells around a continuous coordinate
    ///
    /// Coordinates are clamped to the interior and the upper neighbor never
    /// leaves it, so border cells are not read.
    pub fn sample_bilinear(&self, x: f32, y: f32) -> f32 {
        let (ix0, ix1, mix_x) = self.bilinear_axis(x, self.resolution_x);
        let (iy0, iy1, mix_y) = self.bilinear_axis(y, self.resolution_y);

        let h = |ix, iy| self.heat.get(ix, iy);
        let row0 = mix_x * h(ix1, iy0) + (1.0 - mix_x) * h(ix0, iy0);
        let row1 = mix_x * h(ix1, iy1) + (1.0 - mix_x) * h(ix0, iy1);
        mix_y * row1 + (1.0 - mix_y) * row0
    }

    fn bilinear_axis(&self, coord: f32, resolution: usize) -> (usize, usize, f32) {
        let first = self.border as f32;
        let last = self.border + resolution - 1;
        let c = if coord.is_nan() {
            first
        } else {
            coord.clamp(first, last as f32)
        };
        let i0 = c.floor() as usize;
        let i1 = (i0 + 1).min(last);
        (i0, i1, c - c.floor())
    }

    /// Bilinear heat at a world position
    pub fn sample_bilinear_at(&self, position: &Vec3) -> f32 {
        let (x, y) = self.continuous_coords(position);
        self.sample_bilinear(x, y)
    }

    /// Overwrite the heat at a cell (host-side heat injection)
    pub fn set_heat(&mut self, ix: usize, iy: usize, value: f32) {
        self.heat.set(ix, iy, value.max(0.0));
    }

    /// Fire-source value at a cell
    pub fn fire_source_at(&self, ix: usize, iy: usize) -> f32 {
        self.fire_source.get(ix, iy)
    }

    /// Whole heat-transfer field, padding included
    pub fn heat_field(&self) -> &ScalarField {
        &self.heat
    }

    /// Sum of heat over interior cells
    pub fn interior_heat(&self) -> f32 {
        let (width, _) = self.dimensions();
        let b = self.border;
        self.heat
            .as_slice()
            .chunks(width)
            .skip(b)
            .take(self.resolution_y)
            .map(|row| row[b..b + self.resolution_x].iter().sum::<f32>())
            .sum()
    }

    /// Zero both fields
    pub fn clear(&mut self) {
        self.reset_sources();
        self.heat.fill(0.0);
    }
}
