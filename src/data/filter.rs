use super::model::{CatalogRow, ObservedStar, SpectralClass};

/// Exclusive lower bound on a physically plausible B–V color index.
pub const COLOR_INDEX_MIN: f64 = -0.5;
/// Exclusive upper bound on a physically plausible B–V color index.
pub const COLOR_INDEX_MAX: f64 = 3.0;

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Open interval check: both bounds are rejected.
pub fn color_index_in_range(ci: f64) -> bool {
    ci > COLOR_INDEX_MIN && ci < COLOR_INDEX_MAX
}

/// Class from the first character of a spectral type (`"K1III"` → `K`).
pub fn class_code(spectral_type: &str) -> Option<SpectralClass> {
    spectral_type.chars().next().and_then(SpectralClass::from_code)
}

// ---------------------------------------------------------------------------
// Cleaning pass
// ---------------------------------------------------------------------------

/// How many rows each rule removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub total: usize,
    pub missing: usize,
    pub out_of_range: usize,
    pub unknown_class: usize,
    pub retained: usize,
}

impl CleanReport {
    pub fn dropped(&self) -> usize {
        self.total - self.retained
    }
}

/// Why a row was dropped. Rules are applied in this order.
enum Rejection {
    Missing,
    OutOfRange,
    UnknownClass,
}

fn observe(row: &CatalogRow) -> Result<ObservedStar, Rejection> {
    let (Some(ci), Some(absmag), Some(spect)) = (row.ci, row.absmag, row.spect.as_ref()) else {
        return Err(Rejection::Missing);
    };
    if !color_index_in_range(ci) {
        return Err(Rejection::OutOfRange);
    }
    let class = class_code(spect).ok_or(Rejection::UnknownClass)?;
    Ok(ObservedStar {
        color_index: ci,
        absolute_magnitude: absmag,
        spectral_type: spect.clone(),
        class,
    })
}

/// Drop incomplete rows, implausible color indices and unknown classes.
///
/// Survivors keep their input order. Dropped rows are only counted, never
/// reported as errors.
pub fn clean(rows: &[CatalogRow]) -> (Vec<ObservedStar>, CleanReport) {
    let mut report = CleanReport {
        total: rows.len(),
        ..CleanReport::default()
    };

    let stars: Vec<ObservedStar> = rows
        .iter()
        .filter_map(|row| match observe(row) {
            Ok(star) => Some(star),
            Err(Rejection::Missing) => {
                report.missing += 1;
                None
            }
            Err(Rejection::OutOfRange) => {
                report.out_of_range += 1;
                None
            }
            Err(Rejection::UnknownClass) => {
                report.unknown_class += 1;
                None
            }
        })
        .collect();

    report.retained = stars.len();
    (stars, report)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn retained(row: CatalogRow) -> bool {
        clean(&[row]).0.len() == 1
    }

    #[test]
    fn color_index_bounds_are_open() {
        assert!(!retained(CatalogRow::new(-0.5, 1.0, "G2V")));
        assert!(!retained(CatalogRow::new(3.0, 1.0, "G2V")));
        assert!(retained(CatalogRow::new(-0.499, 1.0, "G2V")));
        assert!(retained(CatalogRow::new(2.999, 1.0, "G2V")));
    }

    #[test]
    fn class_comes_from_first_character() {
        let (stars, _) = clean(&[CatalogRow::new(0.65, 4.83, "G2V")]);
        assert_eq!(stars[0].class, SpectralClass::G);
        assert_eq!(stars[0].spectral_type, "G2V");

        assert!(!retained(CatalogRow::new(0.65, 4.83, "L1")));
        assert!(!retained(CatalogRow::new(0.65, 4.83, "g2V")));
        assert!(!retained(CatalogRow::new(0.65, 4.83, " G2V")));
        assert_eq!(class_code(""), None);
    }

    #[test]
    fn any_missing_field_drops_the_row() {
        let mut row = CatalogRow::new(0.65, 4.83, "G2V");
        row.ci = None;
        assert!(!retained(row));

        let mut row = CatalogRow::new(0.65, 4.83, "G2V");
        row.absmag = None;
        assert!(!retained(row));

        let mut row = CatalogRow::new(0.65, 4.83, "G2V");
        row.spect = None;
        assert!(!retained(row));
    }

    #[test]
    fn report_counts_each_rule_and_keeps_order() {
        let rows = vec![
            CatalogRow::new(1.2, 0.5, "K0III"),
            CatalogRow::default(),
            CatalogRow::new(5.0, 2.0, "M2III"),
            CatalogRow::new(0.1, 1.0, "DA2"),
            CatalogRow::new(0.0, 0.6, "A0V"),
        ];
        let (stars, report) = clean(&rows);

        let classes: Vec<SpectralClass> = stars.iter().map(|s| s.class).collect();
        assert_eq!(classes, vec![SpectralClass::K, SpectralClass::A]);
        assert_eq!(
            report,
            CleanReport {
                total: 5,
                missing: 1,
                out_of_range: 1,
                unknown_class: 1,
                retained: 2,
            }
        );
        assert_eq!(report.dropped(), 3);
    }

    fn arb_row() -> impl Strategy<Value = CatalogRow> {
        (
            proptest::option::of(-2.0f64..5.0),
            proptest::option::of(-10.0f64..20.0),
            proptest::option::of("[OBAFGKMLTWDCS][0-9](I|II|III|IV|V)?"),
        )
            .prop_map(|(ci, absmag, spect)| CatalogRow { ci, absmag, spect })
    }

    proptest! {
        #[test]
        fn cleaning_is_idempotent(rows in proptest::collection::vec(arb_row(), 0..64)) {
            let (once, _) = clean(&rows);
            let again_input: Vec<CatalogRow> = once.iter().map(CatalogRow::from).collect();
            let (twice, report) = clean(&again_input);
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(report.dropped(), 0);
        }

        #[test]
        fn survivors_satisfy_every_invariant(rows in proptest::collection::vec(arb_row(), 0..64)) {
            let (stars, report) = clean(&rows);
            prop_assert_eq!(report.retained + report.dropped(), rows.len());
            for star in &stars {
                prop_assert!(star.color_index > -0.5 && star.color_index < 3.0);
                prop_assert_eq!(star.spectral_type.chars().next(), Some(star.class.letter()));
            }
        }
    }
}
