use serde::{Deserialize, Serialize};

/// Turkish VAT brackets printed on Z reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VatRate {
    Zero,
    One,
    Ten,
    Twenty,
}

impl VatRate {
    pub const ALL: [VatRate; 4] = [VatRate::Zero, VatRate::One, VatRate::Ten, VatRate::Twenty];

    pub fn as_percent(self) -> u8 {
        match self {
            VatRate::Zero => 0,
            VatRate::One => 1,
            VatRate::Ten => 10,
            VatRate::Twenty => 20,
        }
    }

    pub fn from_percent(p: u8) -> Option<Self> {
        match p {
            0 => Some(VatRate::Zero),
            1 => Some(VatRate::One),
            10 => Some(VatRate::Ten),
            20 => Some(VatRate::Twenty),
            _ => None,
        }
    }
}

impl std::fmt::Display for VatRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_percent())
    }
}

impl std::str::FromStr for VatRate {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let p: u8 = s.parse().map_err(|_| format!("Invalid VAT rate: '{s}'"))?;
        VatRate::from_percent(p).ok_or_else(|| format!("Unknown VAT rate: '{s}'"))
    }
}

/// Pre-tax subtotal per VAT bracket. Absent brackets stay at 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxBases {
    pub zero: f64,
    pub one: f64,
    pub ten: f64,
    pub twenty: f64,
}

impl TaxBases {
    pub fn get(&self, rate: VatRate) -> f64 {
        match rate {
            VatRate::Zero => self.zero,
            VatRate::One => self.one,
            VatRate::Ten => self.ten,
            VatRate::Twenty => self.twenty,
        }
    }

    pub fn set(&mut self, rate: VatRate, value: f64) {
        match rate {
            VatRate::Zero => self.zero = value,
            VatRate::One => self.one = value,
            VatRate::Ten => self.ten = value,
            VatRate::Twenty => self.twenty = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VatRate, f64)> + '_ {
        VatRate::ALL.into_iter().map(|r| (r, self.get(r)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// The record reconciled to a positive daily total.
    Pass,
    /// Nothing usable was recovered; route to human review.
    Fail,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pass => write!(f, "pass"),
            ReportStatus::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(ReportStatus::Pass),
            "fail" => Ok(ReportStatus::Fail),
            other => Err(format!("Unknown report status: '{other}'")),
        }
    }
}

/// The extracted, reconciled representation of one end-of-day summary receipt.
/// Built once per input image and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZReport {
    pub source_file: String,
    /// `DD.MM.YYYY`, empty when no date was recognized.
    pub date: String,
    /// Sequential report number, empty when not recognized.
    pub sequence_no: String,
    pub total: f64,
    pub cash: f64,
    pub card: f64,
    pub vat: f64,
    pub tax_bases: TaxBases,
    pub status: ReportStatus,
}

impl ZReport {
    /// The all-default record: what illegible input degrades to.
    pub fn empty(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            date: String::new(),
            sequence_no: String::new(),
            total: 0.0,
            cash: 0.0,
            card: 0.0,
            vat: 0.0,
            tax_bases: TaxBases::default(),
            status: ReportStatus::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn vat_rate_percent_roundtrip() {
        for rate in VatRate::ALL {
            assert_eq!(VatRate::from_percent(rate.as_percent()), Some(rate));
            assert_eq!(VatRate::from_str(&rate.to_string()).unwrap(), rate);
        }
        assert_eq!(VatRate::from_percent(18), None);
    }

    #[test]
    fn tax_bases_get_set() {
        let mut bases = TaxBases::default();
        bases.set(VatRate::Ten, 812.50);
        assert_eq!(bases.get(VatRate::Ten), 812.50);
        assert_eq!(bases.get(VatRate::Twenty), 0.0);
        assert_eq!(bases.iter().count(), 4);
    }

    #[test]
    fn report_status_roundtrip() {
        assert_eq!(
            ReportStatus::from_str(&ReportStatus::Pass.to_string()).unwrap(),
            ReportStatus::Pass
        );
        assert_eq!(
            ReportStatus::from_str(&ReportStatus::Fail.to_string()).unwrap(),
            ReportStatus::Fail
        );
        assert!(ReportStatus::from_str("approved").is_err());
    }

    #[test]
    fn empty_record_defaults() {
        let r = ZReport::empty("z_0042.jpg");
        assert_eq!(r.source_file, "z_0042.jpg");
        assert_eq!(r.total, 0.0);
        assert!(r.date.is_empty());
        assert_eq!(r.status, ReportStatus::Fail);
    }
}
