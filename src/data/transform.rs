use super::model::{ObservedStar, StarRecord};

/// Absolute visual magnitude of the Sun.
pub const SOLAR_ABSOLUTE_MAGNITUDE: f64 = 4.83;

/// Effective temperature (K) from the B–V color index, Ballesteros (2012).
///
/// Neither denominator reaches zero for `ci` inside the cleaner's open
/// interval (-0.5, 3); outside it the result is whatever IEEE arithmetic
/// gives.
pub fn effective_temperature(ci: f64) -> f64 {
    4600.0 * (1.0 / (0.92 * ci + 1.7) + 1.0 / (0.92 * ci + 0.62))
}

/// Luminosity in solar units from absolute magnitude.
pub fn luminosity(absolute_magnitude: f64) -> f64 {
    10f64.powf(0.4 * (SOLAR_ABSOLUTE_MAGNITUDE - absolute_magnitude))
}

/// Inverse of [`luminosity`]; used for the magnitude axis.
pub fn magnitude_from_luminosity(luminosity: f64) -> f64 {
    SOLAR_ABSOLUTE_MAGNITUDE - 2.5 * luminosity.log10()
}

impl From<ObservedStar> for StarRecord {
    fn from(star: ObservedStar) -> Self {
        let teff = effective_temperature(star.color_index);
        let lum = luminosity(star.absolute_magnitude);
        StarRecord::new(star, teff, lum)
    }
}

/// Attach derived physics to every cleaned star, preserving order.
pub fn transform(stars: Vec<ObservedStar>) -> Vec<StarRecord> {
    stars.into_iter().map(StarRecord::from).collect()
}
