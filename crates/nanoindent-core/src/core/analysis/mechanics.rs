use crate::core::units::{ANGSTROM_TO_NM, EV_PER_A_TO_NN, EV_PER_A3_TO_GPA};

/// Indentation depth before shifting, `initdiam + offset - xeta`, in Å.
///
/// The offset is the gap between the indenter plane and the particle surface at first contact.
pub fn raw_depth(initdiam: &[f64], xeta: &[f64], offset: f64) -> Vec<f64> {
    initdiam
        .iter()
        .zip(xeta)
        .map(|(d, z)| d + offset - z)
        .collect()
}

/// Shifts the raw depth by the magnitude of its minimum so that the most negative value maps to
/// zero. A non-negative series is shifted upwards by its minimum instead.
fn shifted_depth(raw: &[f64]) -> Vec<f64> {
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let shift = if min.is_finite() { min.abs() } else { 0.0 };
    raw.iter().map(|r| r + shift).collect()
}

/// Indenter displacement in nm.
pub fn displacement(initdiam: &[f64], xeta: &[f64], offset: f64) -> Vec<f64> {
    shifted_depth(&raw_depth(initdiam, xeta, offset))
        .into_iter()
        .map(|d| d * ANGSTROM_TO_NM)
        .collect()
}

/// Engineering strain, shifted depth over the initial diameter.
pub fn strain(initdiam: &[f64], xeta: &[f64], offset: f64) -> Vec<f64> {
    shifted_depth(&raw_depth(initdiam, xeta, offset))
        .into_iter()
        .zip(initdiam)
        .map(|(d, diam)| d / diam)
        .collect()
}

/// Contact area from a contact-atom count and the projected area of one atom.
pub fn contact_area(contact_atoms: &[f64], atomic_area: f64) -> Vec<f64> {
    contact_atoms.iter().map(|n| n * atomic_area).collect()
}

/// Stress in GPa from a force in eV/Å and an area in Å².
///
/// A zero area yields an infinite or NaN stress.
pub fn stress(force: &[f64], area: &[f64]) -> Vec<f64> {
    force
        .iter()
        .zip(area)
        .map(|(f, a)| f / a * EV_PER_A3_TO_GPA)
        .collect()
}

/// Force converted from eV/Å to nN.
pub fn force_nn(force: &[f64]) -> Vec<f64> {
    force.iter().map(|f| f * EV_PER_A_TO_NN).collect()
}
