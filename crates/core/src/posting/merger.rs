//! Merging GR and IR postings into per-line event streams.

use std::collections::BTreeMap;

use poflow_shared::types::PoLineId;

use super::types::{Posting, PostingStream};

/// Combines GR and IR postings into ordered per-line streams.
pub struct PostingMerger;

impl PostingMerger {
    /// Groups postings strictly by PO line and sorts each group.
    ///
    /// Order within a line: ascending posting date, GR before IR on the same
    /// date, then the order the postings were supplied (GR table first, then
    /// IR table). Every posting lands in exactly one stream. Streams come back
    /// keyed and iterated in ascending `po_line_id` order.
    #[must_use]
    pub fn merge(
        gr: impl IntoIterator<Item = Posting>,
        ir: impl IntoIterator<Item = Posting>,
    ) -> BTreeMap<PoLineId, PostingStream> {
        let mut streams: BTreeMap<PoLineId, PostingStream> = BTreeMap::new();

        for posting in gr.into_iter().chain(ir) {
            streams
                .entry(posting.po_line_id.clone())
                .or_insert_with_key(|id| PostingStream::empty(id.clone()))
                .postings
                .push(posting);
        }

        for stream in streams.values_mut() {
            Self::sort(&mut stream.postings);
        }

        streams
    }

    /// Applies the tie-break to one line's postings. The sort is stable.
    pub fn sort(postings: &mut [Posting]) {
        postings.sort_by_key(|p| (p.posting_date, p.posting_type));
    }
}
