use zrapor_core::{ReportStatus, TaxBases};

/// Monetary fields as the locator left them — possibly contradictory.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFields {
    pub total: f64,
    pub cash: f64,
    pub card: f64,
    pub vat: f64,
    pub tax_bases: TaxBases,
}

/// Fields after cross-validation, plus the verdict.
#[derive(Debug, Clone, Copy)]
pub struct ReconciledFields {
    pub total: f64,
    pub cash: f64,
    pub card: f64,
    pub vat: f64,
    pub tax_bases: TaxBases,
    pub status: ReportStatus,
}

/// Cross-validate the located fields. Total over any input; rule order is
/// fixed — the derived total must be settled before it can bound the VAT
/// figures.
pub fn reconcile(raw: RawFields, ceiling: f64) -> ReconciledFields {
    // Defensive re-check of the upstream filters: negative, non-finite and
    // lifetime-counter magnitudes all collapse to the absence sentinel.
    let sane = |v: f64| if v.is_finite() && v > 0.0 && v <= ceiling { v } else { 0.0 };

    let cash = sane(raw.cash);
    let card = sane(raw.card);
    let mut total = sane(raw.total);
    let mut vat = sane(raw.vat);

    // The sum of the payment legs outranks a single recognized total — the
    // total line is the one most often lost to a faded ribbon section.
    let derived = cash + card;
    if total == 0.0 || total < derived {
        total = derived;
    }

    // A VAT figure above the (now settled) total is contamination from a
    // cumulative counter printed elsewhere on the receipt.
    if vat > total {
        vat = 0.0;
    }

    let mut tax_bases = TaxBases::default();
    for (rate, value) in raw.tax_bases.iter() {
        let value = sane(value);
        tax_bases.set(rate, if value > total { 0.0 } else { value });
    }

    let status = if total > 0.0 {
        ReportStatus::Pass
    } else {
        ReportStatus::Fail
    };

    ReconciledFields {
        total,
        cash,
        card,
        vat,
        tax_bases,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zrapor_core::VatRate;

    fn raw(total: f64, cash: f64, card: f64, vat: f64) -> RawFields {
        RawFields {
            total,
            cash,
            card,
            vat,
            tax_bases: TaxBases::default(),
        }
    }

    const CEILING: f64 = 5_000_000.0;

    #[test]
    fn derived_total_fills_missing_total() {
        let r = reconcile(raw(0.0, 800.0, 450.0, 0.0), CEILING);
        assert_eq!(r.total, 1250.0);
        assert_eq!(r.status, ReportStatus::Pass);
    }

    #[test]
    fn derived_total_outranks_smaller_recognized_total() {
        let r = reconcile(raw(900.0, 800.0, 450.0, 0.0), CEILING);
        assert_eq!(r.total, 1250.0);
    }

    #[test]
    fn larger_recognized_total_is_kept() {
        let r = reconcile(raw(1300.0, 800.0, 450.0, 0.0), CEILING);
        assert_eq!(r.total, 1300.0);
    }

    #[test]
    fn contaminated_vat_reset() {
        let r = reconcile(raw(1250.0, 0.0, 0.0, 50_000.0), CEILING);
        assert_eq!(r.vat, 0.0);
        assert_eq!(r.total, 1250.0);
    }

    #[test]
    fn vat_bounded_by_derived_not_raw_total() {
        // Raw total 0, derived 1250 — a VAT of 100 must survive because the
        // derivation step runs first.
        let r = reconcile(raw(0.0, 800.0, 450.0, 100.0), CEILING);
        assert_eq!(r.vat, 100.0);
    }

    #[test]
    fn tax_base_above_total_reset_others_kept() {
        let mut input = raw(1250.0, 0.0, 0.0, 0.0);
        input.tax_bases.set(VatRate::Ten, 812.50);
        input.tax_bases.set(VatRate::Twenty, 99_999.0);
        let r = reconcile(input, CEILING);
        assert_eq!(r.tax_bases.get(VatRate::Ten), 812.50);
        assert_eq!(r.tax_bases.get(VatRate::Twenty), 0.0);
    }

    #[test]
    fn all_zero_fails() {
        let r = reconcile(raw(0.0, 0.0, 0.0, 0.0), CEILING);
        assert_eq!(r.total, 0.0);
        assert_eq!(r.status, ReportStatus::Fail);
    }

    #[test]
    fn negative_and_oversized_inputs_collapse_to_zero() {
        let r = reconcile(raw(-10.0, f64::NAN, 6_000_000.0, -1.0), CEILING);
        assert_eq!(r.total, 0.0);
        assert_eq!(r.cash, 0.0);
        assert_eq!(r.card, 0.0);
        assert_eq!(r.vat, 0.0);
        assert_eq!(r.status, ReportStatus::Fail);
    }

    #[test]
    fn invariants_hold_for_arbitrary_inputs() {
        let samples = [
            raw(0.0, 0.0, 0.0, 0.0),
            raw(100.0, 900.0, 500.0, 2000.0),
            raw(5000.0, 0.0, 0.0, 4999.0),
            raw(-5.0, -5.0, 1e12, 1e12),
        ];
        for s in samples {
            let r = reconcile(s, CEILING);
            assert!(r.total >= 0.0 && r.cash >= 0.0 && r.card >= 0.0 && r.vat >= 0.0);
            if r.cash > 0.0 || r.card > 0.0 {
                assert!(r.total >= r.cash + r.card - f64::EPSILON);
            }
            assert!(r.vat <= r.total);
            for (_, b) in r.tax_bases.iter() {
                assert!(b >= 0.0 && b <= r.total);
            }
            assert_eq!(r.status == ReportStatus::Pass, r.total > 0.0);
        }
    }
}
