//! Posting domain types.

use chrono::NaiveDate;
use poflow_shared::types::PoLineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of posting.
///
/// The derived ordering puts `Gr` before `Ir`; the merger relies on it for the
/// same-day tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PostingType {
    /// Goods receipt.
    #[serde(rename = "GR")]
    Gr,
    /// Invoice receipt.
    #[serde(rename = "IR")]
    Ir,
}

impl PostingType {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gr => "GR",
            Self::Ir => "IR",
        }
    }
}

impl std::fmt::Display for PostingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "GR" => Ok(Self::Gr),
            "IR" => Ok(Self::Ir),
            other => Err(format!("Unknown posting type: {other}")),
        }
    }
}

/// A single GR or IR event against a PO line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// PO line the posting belongs to.
    pub po_line_id: PoLineId,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// GR or IR.
    pub posting_type: PostingType,
    /// Signed quantity; negative for reversals.
    pub posting_qty: Decimal,
    /// USD amount of the posting.
    pub posting_amount: Decimal,
}

impl Posting {
    /// Creates a goods-receipt posting.
    #[must_use]
    pub fn gr(po_line_id: PoLineId, posting_date: NaiveDate, qty: Decimal, amount: Decimal) -> Self {
        Self {
            po_line_id,
            posting_date,
            posting_type: PostingType::Gr,
            posting_qty: qty,
            posting_amount: amount,
        }
    }

    /// Creates an invoice-receipt posting.
    #[must_use]
    pub fn ir(po_line_id: PoLineId, posting_date: NaiveDate, qty: Decimal, amount: Decimal) -> Self {
        Self {
            po_line_id,
            posting_date,
            posting_type: PostingType::Ir,
            posting_qty: qty,
            posting_amount: amount,
        }
    }
}

/// Chronologically ordered postings of one PO line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingStream {
    /// PO line all postings belong to.
    pub po_line_id: PoLineId,
    /// Postings sorted by date, then GR before IR, then input order.
    pub postings: Vec<Posting>,
}

impl PostingStream {
    /// Creates an empty stream.
    #[must_use]
    pub fn empty(po_line_id: PoLineId) -> Self {
        Self {
            po_line_id,
            postings: Vec::new(),
        }
    }

    /// Number of postings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Returns true if the stream holds no postings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Iterates the postings in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }
}

impl<'a> IntoIterator for &'a PostingStream {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}
