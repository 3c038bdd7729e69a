use std::fmt;

// ---------------------------------------------------------------------------
// SpectralClass – the seven Harvard classes, hottest first
// ---------------------------------------------------------------------------

/// Single-letter stellar classification, ordered from hottest to coolest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    /// All classes in plotting order.
    pub const ALL: [SpectralClass; 7] = [
        SpectralClass::O,
        SpectralClass::B,
        SpectralClass::A,
        SpectralClass::F,
        SpectralClass::G,
        SpectralClass::K,
        SpectralClass::M,
    ];

    /// Resolve a class code. Case-sensitive: `'g'` is not a class.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'O' => Some(SpectralClass::O),
            'B' => Some(SpectralClass::B),
            'A' => Some(SpectralClass::A),
            'F' => Some(SpectralClass::F),
            'G' => Some(SpectralClass::G),
            'K' => Some(SpectralClass::K),
            'M' => Some(SpectralClass::M),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            SpectralClass::O => 'O',
            SpectralClass::B => 'B',
            SpectralClass::A => 'A',
            SpectralClass::F => 'F',
            SpectralClass::G => 'G',
            SpectralClass::K => 'K',
            SpectralClass::M => 'M',
        }
    }

    /// Conventional temperature (K) used to place the class letter on the
    /// top axis. Independent of the data.
    pub fn boundary_temperature(self) -> f64 {
        match self {
            SpectralClass::O => 40_000.0,
            SpectralClass::B => 20_000.0,
            SpectralClass::A => 10_000.0,
            SpectralClass::F => 7_500.0,
            SpectralClass::G => 5_800.0,
            SpectralClass::K => 4_500.0,
            SpectralClass::M => 3_000.0,
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ---------------------------------------------------------------------------
// CatalogRow – one raw row of the source catalog
// ---------------------------------------------------------------------------

/// The three catalog columns the pipeline needs. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogRow {
    /// B–V color index.
    pub ci: Option<f64>,
    /// Absolute visual magnitude.
    pub absmag: Option<f64>,
    /// Spectral type string, e.g. `G2V`.
    pub spect: Option<String>,
}

impl CatalogRow {
    #[cfg(test)]
    pub fn new(ci: f64, absmag: f64, spect: &str) -> Self {
        CatalogRow {
            ci: Some(ci),
            absmag: Some(absmag),
            spect: Some(spect.to_string()),
        }
    }
}

impl From<&ObservedStar> for CatalogRow {
    fn from(star: &ObservedStar) -> Self {
        CatalogRow {
            ci: Some(star.color_index),
            absmag: Some(star.absolute_magnitude),
            spect: Some(star.spectral_type.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// ObservedStar – a row that survived cleaning
// ---------------------------------------------------------------------------

/// A complete row with a recognised class and a plausible color index.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedStar {
    pub color_index: f64,
    pub absolute_magnitude: f64,
    pub spectral_type: String,
    pub class: SpectralClass,
}

// ---------------------------------------------------------------------------
// StarRecord – observed values plus derived physics
// ---------------------------------------------------------------------------

/// A cleaned star with its derived temperature and luminosity.
///
/// Fields are private: a record is built once by the transformer and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    observed: ObservedStar,
    effective_temperature: f64,
    luminosity: f64,
}

impl StarRecord {
    pub(crate) fn new(observed: ObservedStar, effective_temperature: f64, luminosity: f64) -> Self {
        StarRecord {
            observed,
            effective_temperature,
            luminosity,
        }
    }

    #[cfg(test)]
    pub fn spectral_type(&self) -> &str {
        &self.observed.spectral_type
    }

    pub fn class(&self) -> SpectralClass {
        self.observed.class
    }

    /// Effective temperature in Kelvin.
    pub fn effective_temperature(&self) -> f64 {
        self.effective_temperature
    }

    /// Luminosity in solar units.
    pub fn luminosity(&self) -> f64 {
        self.luminosity
    }
}
