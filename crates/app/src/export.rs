use std::path::Path;
use thiserror::Error;

use zrapor_core::ZReport;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Column order mirrors the reviewers' spreadsheet: verdict first, file last.
const HEADER: [&str; 12] = [
    "Durum",
    "Tarih",
    "Z No",
    "Toplam",
    "Nakit",
    "Kredi",
    "KDV",
    "Matrah %0",
    "Matrah %1",
    "Matrah %10",
    "Matrah %20",
    "Dosya",
];

/// Write one CSV row per record, amounts with two decimals.
pub fn write_csv(path: &Path, records: &[ZReport]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    for r in records {
        writer.write_record([
            r.status.to_string(),
            r.date.clone(),
            r.sequence_no.clone(),
            money(r.total),
            money(r.cash),
            money(r.card),
            money(r.vat),
            money(r.tax_bases.zero),
            money(r.tax_bases.one),
            money(r.tax_bases.ten),
            money(r.tax_bases.twenty),
            r.source_file.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn money(v: f64) -> String {
    format!("{v:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use zrapor_core::{ReportStatus, TaxBases};

    fn record(file: &str, total: f64) -> ZReport {
        ZReport {
            source_file: file.to_string(),
            date: "16.10.2025".to_string(),
            sequence_no: "0042".to_string(),
            total,
            cash: 800.0,
            card: 450.0,
            vat: 113.64,
            tax_bases: TaxBases {
                ten: 812.5,
                ..TaxBases::default()
            },
            status: if total > 0.0 {
                ReportStatus::Pass
            } else {
                ReportStatus::Fail
            },
        }
    }

    #[test]
    fn header_and_rows_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &[record("z_0042.jpg", 1250.0)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Durum,Tarih,Z No,Toplam,Nakit,Kredi,KDV,Matrah %0,Matrah %1,Matrah %10,Matrah %20,Dosya"
        );
        assert_eq!(
            lines.next().unwrap(),
            "pass,16.10.2025,0042,1250.00,800.00,450.00,113.64,0.00,0.00,812.50,0.00,z_0042.jpg"
        );
    }

    #[test]
    fn failed_record_exports_zeroes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &[ZReport::empty("blank.jpg")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row, "fail,,,0.00,0.00,0.00,0.00,0.00,0.00,0.00,0.00,blank.jpg");
    }

    #[test]
    fn empty_batch_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &[]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
