/// Data layer: catalog rows, cleaning, and derived physics.
///
/// Architecture:
/// ```text
///  hyg_v42.csv.gz / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<CatalogRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  drop incomplete / implausible rows → Vec<ObservedStar>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform │  Teff + luminosity → Vec<StarRecord>
///   └───────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod transform;
