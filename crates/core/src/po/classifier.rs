//! Simple/Complex classification.

use poflow_shared::config::ClassificationConfig;

use super::types::{Classification, PoClass, PoLine};

/// Classifies PO lines by vendor and account-assignment category.
pub struct PoClassifier;

impl PoClassifier {
    /// Classifies one PO line.
    ///
    /// Simple when the vendor category equals the configured GLD category and
    /// the account category is one of the configured letters. A line with an
    /// empty vendor or account field is Complex and flagged ambiguous.
    #[must_use]
    pub fn classify(line: &PoLine, config: &ClassificationConfig) -> Classification {
        let vendor = line.vendor_category.trim();
        let account = line.account_assignment_category.trim();
        let ambiguous = vendor.is_empty() || account.is_empty();

        let is_simple = !ambiguous
            && vendor == config.simple_vendor_category
            && config
                .simple_account_categories
                .iter()
                .any(|category| category == account);

        Classification {
            class: if is_simple {
                PoClass::Simple
            } else {
                PoClass::Complex
            },
            ambiguous,
            closed: Self::is_closed(line, config),
        }
    }

    /// Returns true when the line carries the closed receipt status.
    #[must_use]
    pub fn is_closed(line: &PoLine, config: &ClassificationConfig) -> bool {
        line.receipt_status.trim() == config.closed_receipt_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poflow_shared::types::PoLineId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn line(vendor: &str, account: &str, status: &str) -> PoLine {
        PoLine::new(
            PoLineId::from("4500000001-10"),
            vendor,
            account,
            dec!(10),
            dec!(100),
            status,
        )
    }

    #[rstest]
    #[case("GLD", "K", PoClass::Simple)]
    #[case("GLD", "P", PoClass::Simple)]
    #[case("GLD", "S", PoClass::Simple)]
    #[case("GLD", "V", PoClass::Simple)]
    #[case("GLD", "F", PoClass::Complex)]
    #[case("3rd Party", "K", PoClass::Complex)]
    #[case("OPS", "V", PoClass::Complex)]
    #[case("gld", "K", PoClass::Complex)]
    fn test_classify(#[case] vendor: &str, #[case] account: &str, #[case] expected: PoClass) {
        let config = ClassificationConfig::default();
        let result = PoClassifier::classify(&line(vendor, account, "OPEN"), &config);
        assert_eq!(result.class, expected);
        assert!(!result.ambiguous);
    }

    #[rstest]
    #[case("", "K")]
    #[case("GLD", "")]
    #[case("  ", " ")]
    fn test_missing_fields_default_to_complex(#[case] vendor: &str, #[case] account: &str) {
        let config = ClassificationConfig::default();
        let result = PoClassifier::classify(&line(vendor, account, "OPEN"), &config);
        assert_eq!(result.class, PoClass::Complex);
        assert!(result.ambiguous);
    }

    #[test]
    fn test_closed_simple_line_is_not_grir_eligible() {
        let config = ClassificationConfig::default();
        let closed = PoClassifier::classify(&line("GLD", "K", "CLOSED PO"), &config);
        assert_eq!(closed.class, PoClass::Simple);
        assert!(closed.closed);
        assert!(!closed.is_grir_eligible());

        let open = PoClassifier::classify(&line("GLD", "K", "PARTIALLY RECEIVED"), &config);
        assert!(open.is_grir_eligible());
    }

    #[test]
    fn test_complex_line_is_never_grir_eligible() {
        let config = ClassificationConfig::default();
        let result = PoClassifier::classify(&line("3rd Party", "K", "OPEN"), &config);
        assert!(!result.is_grir_eligible());
    }
}
