//! Heat transfer kernels for the padded heat grid
//!
//! Three phenomena move heat each tick:
//!
//! ```text
//! radiation:    H[src] += T·dt,   H[n] -= (S[n] - T)·dt / d(src, n)   for the 8 neighbors n
//! advection:    δ = |H[c+o] - H[c]|·dt·m,   H[c] = max(0, H[c] - δ),   H[c+o] += δ
//! dissipation:  H[c] = max(0, H[c] - k·dt)
//! ```
//!
//! Where:
//! - `S`: fire-source field (rebuilt every tick from burning plants)
//! - `H`: heat-transfer field (persistent, read by the ignition test)
//! - `T`: source temperature at the radiating cell
//! - `d`: cell spacing along the axis, or the cell diagonal
//! - `o`, `m`: quantized wind offset and wind multiplier
//! - `k`: decay rate
//!
//! The kernels work on flat row-major slices whose extent includes the
//! border padding; callers guarantee every visited cell is interior.

use rayon::prelude::*;

/// Physical spacing between cell centers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpacing {
    /// Spacing along grid x (world X)
    pub dx: f32,
    /// Spacing along grid y (world Z)
    pub dz: f32,
    /// `sqrt(dx² + dz²)`
    pub diagonal: f32,
}

impl CellSpacing {
    #[must_use]
    pub fn new(dx: f32, dz: f32) -> Self {
        Self {
            dx,
            dz,
            diagonal: dx.hypot(dz),
        }
    }
}

/// Parameters for one radiation pass
#[derive(Debug, Clone, Copy)]
pub struct RadiationParams {
    /// Scaled timestep
    pub dt: f32,
    /// Grid width in cells, padding included
    pub width: usize,
    pub spacing: CellSpacing,
}

/// Parameters for one wind advection pass
#[derive(Debug, Clone, Copy)]
pub struct AdvectionParams {
    /// Scaled timestep
    pub dt: f32,
    /// Quantized wind offset along grid x
    pub offset_x: isize,
    /// Quantized wind offset along grid y
    pub offset_y: isize,
    /// Horizontal share of the propagation direction (0 = calm, ~1 = strong)
    pub multiplier: f32,
}

/// Padded grid extent shared by the interior-only kernels
#[derive(Debug, Clone, Copy)]
pub struct Interior {
    /// Grid width in cells, padding included
    pub width: usize,
    /// Grid height in cells, padding included
    pub height: usize,
    /// Padding on every side
    pub border: usize,
}

/// Radiate every source cell into its 8 neighbors
///
/// `sources` lists flat indices of cells whose fire-source value is positive,
/// in stamping order. Heat flows from higher to lower fire-source potential,
/// so a neighbor that is itself a source at the same temperature receives
/// nothing.
pub fn radiate_sources_cpu(
    fire_source: &[f32],
    heat: &mut [f32],
    sources: &[usize],
    params: RadiationParams,
) {
    let w = params.width;
    let RadiationParams { dt, spacing, .. } = params;
    let axis_x = dt / spacing.dx;
    let axis_z = dt / spacing.dz;
    let diagonal = dt / spacing.diagonal;

    for &idx in sources {
        let t = fire_source[idx];

        // (neighbor, weight): orthogonal along z, along x, then diagonals
        let neighbors = [
            (idx - w, axis_z),
            (idx + w, axis_z),
            (idx - 1, axis_x),
            (idx + 1, axis_x),
            (idx - w - 1, diagonal),
            (idx + w - 1, diagonal),
            (idx - w + 1, diagonal),
            (idx + w + 1, diagonal),
        ];

        heat[idx] += t * dt;

        // Negative difference means the neighbor is cooler: subtracting adds heat
        for (n, weight) in neighbors {
            heat[n] -= (fire_source[n] - t) * weight;
        }
    }
}

/// Linear cooling of the interior, floored at zero
///
/// Models heat rising away from the ground plane. Border cells are untouched.
pub fn dissipate_cpu(heat: &mut [f32], interior: Interior, amount: f32) {
    let Interior {
        width,
        height,
        border,
    } = interior;

    heat.par_chunks_mut(width)
        .enumerate()
        .filter(|(y, _)| *y >= border && *y < height - border)
        .for_each(|(_, row)| {
            for cell in &mut row[border..width - border] {
                *cell = (*cell - amount).max(0.0);
            }
        });
}

/// Push heat one cell along the quantized wind direction
///
/// For every interior cell `c`, the magnitude of the difference to `c + offset`
/// is always moved from `c` to `c + offset`: transport is downwind only.
/// The pass is sequential and in place, so heat can travel further than one
/// cell per tick when the offset points along the iteration order.
pub fn advect_cpu(heat: &mut [f32], interior: Interior, params: AdvectionParams) {
    let Interior {
        width,
        height,
        border,
    } = interior;
    let step = params.offset_y * width as isize + params.offset_x;
    let scale = params.dt * params.multiplier;

    for y in border..height - border {
        for x in border..width - border {
            let idx = y * width + x;
            let target = idx.wrapping_add_signed(step);

            let t0 = heat[idx];
            let t1 = heat[target];
            let moved = ((t1 - t0) * scale).abs();

            heat[idx] = (t0 - moved).max(0.0);
            heat[target] += moved;
        }
    }
}
