//! PO line cleaning.

use std::collections::BTreeMap;

use poflow_shared::config::{CleaningConfig, CodeMapping};

use super::types::PoCleaningReport;
use crate::po::PoLine;

/// Filters and normalizes the PO line master.
pub struct PoLineCleaner;

impl PoLineCleaner {
    /// Runs every cleaning pass in order and returns the kept lines.
    ///
    /// 1. Drop excluded valuation classes.
    /// 2. Drop excluded NIS levels.
    /// 3. Fill an empty NIS level for the fill valuation class.
    /// 4. Apply NIS aliases.
    /// 5. Map main and ultimate vendor names by vendor id.
    /// 6. Map plant code to location.
    /// 7. Expected delivery date = promised date, else requested date.
    #[must_use]
    pub fn clean(lines: Vec<PoLine>, config: &CleaningConfig) -> (Vec<PoLine>, PoCleaningReport) {
        let mut report = PoCleaningReport {
            loaded: lines.len(),
            ..PoCleaningReport::default()
        };

        let mut kept = lines;
        kept.retain(|line| {
            let excluded = line
                .details
                .valuation_class
                .is_some_and(|class| config.excluded_valuation_classes.contains(&class));
            if excluded {
                report.excluded_valuation_class += 1;
            }
            !excluded
        });
        kept.retain(|line| {
            let excluded = line
                .details
                .nis_line
                .as_ref()
                .is_some_and(|nis| config.excluded_nis_levels.contains(nis));
            if excluded {
                report.excluded_nis_level += 1;
            }
            !excluded
        });

        let aliases = lookup(&config.nis_aliases);
        let vendors = lookup(&config.vendor_names);
        let plants = lookup(&config.plant_locations);

        for line in &mut kept {
            let details = &mut line.details;

            let nis_empty = details.nis_line.as_deref().is_none_or(str::is_empty);
            if nis_empty && details.valuation_class == Some(config.nis_fill_valuation_class) {
                details.nis_line = Some(config.nis_fill_value.clone());
                report.nis_filled += 1;
            }

            if let Some(alias) = details.nis_line.as_deref().and_then(|nis| aliases.get(nis)) {
                details.nis_line = Some((*alias).to_string());
                report.nis_aliased += 1;
            }

            if let Some(name) = details.main_vendor_id.as_deref().and_then(|id| vendors.get(id)) {
                details.main_vendor_name = Some((*name).to_string());
                report.main_vendor_mapped += 1;
            }

            if let Some(name) = details
                .ultimate_vendor_id
                .as_deref()
                .and_then(|id| vendors.get(id))
            {
                details.ultimate_vendor_name = Some((*name).to_string());
                report.ultimate_vendor_mapped += 1;
            }

            details.location = details
                .plant_code
                .as_deref()
                .and_then(|code| plants.get(code))
                .map(|location| (*location).to_string());
            if details.location.is_some() {
                report.location_mapped += 1;
            }

            details.expected_delivery_date = details
                .promised_delivery_date
                .or(details.requested_delivery_date);
        }

        report.kept = kept.len();
        (kept, report)
    }
}

fn lookup(table: &[CodeMapping]) -> BTreeMap<&str, &str> {
    table
        .iter()
        .map(|row| (row.code.as_str(), row.value.as_str()))
        .collect()
}
