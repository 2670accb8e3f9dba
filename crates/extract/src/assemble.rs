use zrapor_core::ZReport;

use crate::reconcile::ReconciledFields;

/// Compose the final record. Pure constructor — the caller owns the file
/// identity and performs all I/O; nothing here touches the outside world.
pub fn assemble(
    source_file: &str,
    date: String,
    sequence_no: String,
    fields: ReconciledFields,
) -> ZReport {
    ZReport {
        source_file: source_file.to_string(),
        date,
        sequence_no,
        total: fields.total,
        cash: fields.cash,
        card: fields.card,
        vat: fields.vat,
        tax_bases: fields.tax_bases,
        status: fields.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::{reconcile, RawFields};
    use zrapor_core::ReportStatus;

    #[test]
    fn record_carries_source_identity_and_verdict() {
        let fields = reconcile(
            RawFields {
                cash: 800.0,
                card: 450.0,
                ..RawFields::default()
            },
            5_000_000.0,
        );
        let r = assemble("z_0042.jpg", "16.10.2025".into(), "42".into(), fields);
        assert_eq!(r.source_file, "z_0042.jpg");
        assert_eq!(r.date, "16.10.2025");
        assert_eq!(r.sequence_no, "42");
        assert_eq!(r.total, 1250.0);
        assert_eq!(r.status, ReportStatus::Pass);
    }
}
