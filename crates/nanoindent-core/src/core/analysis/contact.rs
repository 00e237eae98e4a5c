use crate::core::models::frame::Frame;
use std::f64::consts::FRAC_PI_4;

/// Counts the particles lying strictly above the indenter plane `z = plane_z`.
pub fn count_above_plane(frame: &Frame, plane_z: f64) -> usize {
    frame.positions.iter().filter(|p| p.z > plane_z).count()
}

/// Elliptical contact area between the particle and a planar indenter, in Å².
///
/// The particles within `tolerance` of the plane span an axis-aligned rectangle in x and y; the
/// contact patch is the ellipse inscribed in it, `π/4 · Δx · Δy`. Returns `0.0` when no particle
/// touches the plane.
pub fn elliptical_contact_area(frame: &Frame, plane_z: f64, tolerance: f64) -> f64 {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;

    for p in frame
        .positions
        .iter()
        .filter(|p| (p.z - plane_z).abs() < tolerance)
    {
        bounds = Some(match bounds {
            None => (p.x, p.x, p.y, p.y),
            Some((xmin, xmax, ymin, ymax)) => {
                (xmin.min(p.x), xmax.max(p.x), ymin.min(p.y), ymax.max(p.y))
            }
        });
    }

    bounds.map_or(0.0, |(xmin, xmax, ymin, ymax)| {
        FRAC_PI_4 * (xmax - xmin) * (ymax - ymin)
    })
}
