//! Stage orchestration.
//!
//! - Stage 1 (clean): raw extracts to cleaned intermediate tables
//! - Stage 2 (transform): cost impact and GRIR exposure per PO line
//! - Stage 3 (prepare): open positions, contracts, import-ready tables

use chrono::NaiveDate;
use clap::ValueEnum;
use poflow_core::batch::{BatchEngine, BatchParams, BatchReport};
use poflow_core::cleaning::{PoCleaningReport, PoLineCleaner, PostingCleaner, PostingCleaningReport};
use poflow_core::contracts::ContractValidator;
use poflow_core::grir::TimeBuckets;
use poflow_core::po::UnitPriceBook;
use poflow_core::posting::{PostingMerger, PostingType};
use poflow_core::prepare::{OpenPositionReport, PreparationService};
use poflow_core::summary::RunSummary;
use poflow_data::{
    CoercionStats, CostImpactRepository, GrirRepository, PoLineRepository, PostingRepository,
};
use poflow_shared::{AppError, AppResult, PipelineConfig};
use tracing::{error, info, warn};

/// A single pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// Raw extracts to cleaned intermediate tables.
    #[value(name = "1", alias = "clean")]
    Clean,
    /// Cleaned tables to cost impact and GRIR exposure.
    #[value(name = "2", alias = "transform")]
    Transform,
    /// Engine outputs to import-ready tables.
    #[value(name = "3", alias = "prepare")]
    Prepare,
}

/// Runs stages against one configuration and snapshot date.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    snapshot_date: NaiveDate,
    po_lines: PoLineRepository,
    postings: PostingRepository,
    cost_impact: CostImpactRepository,
    grir: GrirRepository,
}

impl Pipeline {
    /// Creates a pipeline over the configured directories.
    #[must_use]
    pub fn new(config: PipelineConfig, snapshot_date: NaiveDate) -> Self {
        Self {
            po_lines: PoLineRepository::new(config.paths.clone()),
            postings: PostingRepository::new(config.paths.clone()),
            cost_impact: CostImpactRepository::new(config.paths.clone()),
            grir: GrirRepository::new(config.paths.clone()),
            config,
            snapshot_date,
        }
    }

    /// Runs one stage, or all three in order.
    ///
    /// Returns the run summary when the run produced or consumed engine
    /// outputs (stages 2 and 3).
    pub fn run(&self, stage: Option<Stage>) -> AppResult<Option<RunSummary>> {
        info!(
            stage = ?stage,
            snapshot_date = %self.snapshot_date,
            parallel = self.config.parallel,
            "Starting pipeline"
        );

        let summary = match stage {
            None => {
                self.clean()?;
                self.transform()?;
                Some(self.prepare()?)
            }
            Some(Stage::Clean) => {
                self.clean()?;
                None
            }
            Some(Stage::Transform) => Some(self.transform()?),
            Some(Stage::Prepare) => Some(self.prepare()?),
        };

        if let Some(summary) = &summary {
            log_summary(summary);
        }
        info!("Pipeline complete");
        Ok(summary)
    }

    /// Stage 1: cleans the raw extracts into intermediate tables.
    pub fn clean(&self) -> AppResult<()> {
        info!("Stage 1: clean");
        self.check_raw_inputs()?;

        let mut stats = CoercionStats::new();
        let raw_lines = self.po_lines.load_raw(&mut stats)?;
        let (lines, report) = PoLineCleaner::clean(raw_lines, &self.config.cleaning);
        log_po_cleaning(&report);

        let prices = UnitPriceBook::build(&lines);
        if prices.undefined_count() > 0 {
            warn!(
                lines = prices.undefined_count(),
                "PO lines with zero ordered quantity; unit price set to 0"
            );
        }

        let gr_inputs = self.postings.load_raw(PostingType::Gr, &mut stats)?;
        let (gr, gr_report) = PostingCleaner::clean(PostingType::Gr, gr_inputs, &prices);
        log_posting_cleaning(PostingType::Gr, &gr_report);

        let ir_inputs = self.postings.load_raw(PostingType::Ir, &mut stats)?;
        let (ir, ir_report) = PostingCleaner::clean(PostingType::Ir, ir_inputs, &prices);
        log_posting_cleaning(PostingType::Ir, &ir_report);

        for (column, count) in stats.iter() {
            warn!(column, count, "Coerced malformed values");
        }

        self.po_lines.save_cleaned(&lines)?;
        self.postings.save_cleaned(PostingType::Gr, &gr)?;
        self.postings.save_cleaned(PostingType::Ir, &ir)?;
        info!(
            po_lines = lines.len(),
            gr_postings = gr.len(),
            ir_postings = ir.len(),
            "Stage 1 written"
        );
        Ok(())
    }

    /// Stage 2: reduces every PO line to cost impact and GRIR exposure.
    pub fn transform(&self) -> AppResult<RunSummary> {
        info!("Stage 2: transform");
        let lines = self.po_lines.load_cleaned()?;
        let gr = self.postings.load_cleaned(PostingType::Gr)?;
        let ir = self.postings.load_cleaned(PostingType::Ir)?;

        let streams = PostingMerger::merge(gr, ir);
        let params = BatchParams::from_config(&self.config, self.snapshot_date);
        let outcome = BatchEngine::run(&lines, &streams, &params);
        log_batch(&outcome.report);

        let summary = RunSummary::build(&outcome.cost_impact, &outcome.grir, &params.buckets)?;

        self.cost_impact.save(&outcome.cost_impact)?;
        self.grir.save(&outcome.grir)?;
        info!(
            cost_impact_records = outcome.cost_impact.len(),
            grir_records = outcome.grir.len(),
            "Stage 2 written"
        );
        Ok(summary)
    }

    /// Stage 3: derives open positions, checks contracts, and writes the
    /// import-ready tables. Nothing is written when a contract fails.
    pub fn prepare(&self) -> AppResult<RunSummary> {
        info!("Stage 3: prepare");
        let lines = self.po_lines.load_cleaned()?;
        let cost_impact = self.cost_impact.load()?;
        let grir = self.grir.load()?;
        let buckets = TimeBuckets::from_config(&self.config.grir);
        let classification = &self.config.classification;

        let (prepared, report) =
            PreparationService::open_positions(lines, &cost_impact, classification)
                .inspect_err(|err| error!(error_code = err.error_code(), "{err}"))?;
        log_open_positions(&report);

        let transactions = PreparationService::transactions(&cost_impact);
        let exposures = PreparationService::grir_exposures(&grir);

        let contracts = ContractValidator::validate(
            &prepared,
            &transactions,
            &exposures,
            classification,
            &buckets,
        );
        if contracts.missing_identifiers > 0 {
            warn!(
                lines = contracts.missing_identifiers,
                "PO lines missing a PO number or line number"
            );
        }
        if let Some(first) = contracts.violations.first() {
            for violation in &contracts.violations {
                error!(error_code = violation.error_code(), "{violation}");
            }
            return Err(AppError::Contract(format!(
                "{} violation(s), first: {first}",
                contracts.violations.len()
            )));
        }
        info!(
            transactions = contracts.transactions_checked,
            exposures = contracts.exposures_checked,
            "Contracts passed"
        );

        let summary = RunSummary::build(&cost_impact, &grir, &buckets)?;

        self.po_lines.save_import_ready(&prepared)?;
        self.cost_impact.save_transactions(&transactions)?;
        self.grir.save_import_ready(&exposures)?;
        info!(
            po_line_items = prepared.len(),
            po_transactions = transactions.len(),
            grir_exposures = exposures.len(),
            "Stage 3 written"
        );
        Ok(summary)
    }

    fn check_raw_inputs(&self) -> AppResult<()> {
        let paths = &self.config.paths;
        let missing: Vec<String> = [paths.raw_po_line_items(), paths.raw_gr(), paths.raw_ir()]
            .into_iter()
            .filter(|path| !path.is_file())
            .map(|path| path.display().to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingInput(missing.join(", ")))
        }
    }
}

fn log_po_cleaning(report: &PoCleaningReport) {
    info!(
        loaded = report.loaded,
        excluded_valuation_class = report.excluded_valuation_class,
        excluded_nis_level = report.excluded_nis_level,
        kept = report.kept,
        "Cleaned PO lines"
    );
    info!(
        nis_filled = report.nis_filled,
        nis_aliased = report.nis_aliased,
        main_vendor_mapped = report.main_vendor_mapped,
        ultimate_vendor_mapped = report.ultimate_vendor_mapped,
        location_mapped = report.location_mapped,
        "Applied PO line mappings"
    );
}

fn log_posting_cleaning(kind: PostingType, report: &PostingCleaningReport) {
    info!(
        posting_type = %kind,
        loaded = report.loaded,
        amount_derived = report.amount_derived,
        kept = report.kept,
        "Cleaned postings"
    );
    if report.zero_qty_dropped > 0 {
        info!(posting_type = %kind, rows = report.zero_qty_dropped, "Dropped zero-quantity postings");
    }
    if report.orphan_dropped > 0 {
        warn!(posting_type = %kind, rows = report.orphan_dropped, "Dropped postings with no matching PO line");
    }
    if report.amount_overflow_dropped > 0 {
        warn!(
            posting_type = %kind,
            rows = report.amount_overflow_dropped,
            "Dropped postings whose derived amount overflowed"
        );
    }
}

fn log_open_positions(report: &OpenPositionReport) {
    info!(
        lines = report.lines,
        with_open_value = report.with_open_value,
        closed_forced = report.closed_forced,
        "Derived open positions"
    );
    info!(
        capex = report.capex,
        closed = report.closed,
        gts_blocked = report.gts_blocked,
        pending_approval = report.pending_approval,
        "Derived PO line status flags"
    );
    if report.duplicates_dropped > 0 {
        warn!(lines = report.duplicates_dropped, "Repeated PO line ids dropped");
    }
    if report.unmatched_records > 0 {
        warn!(
            records = report.unmatched_records,
            "Cost impact records without a PO line"
        );
    }
}

fn log_batch(report: &BatchReport) {
    info!(
        lines = report.lines,
        simple = report.simple,
        complex = report.complex,
        grir_eligible = report.grir_eligible,
        cost_impact_records = report.cost_impact_records,
        grir_records = report.grir_records,
        "Reduced PO lines"
    );
    if report.ambiguous > 0 {
        warn!(lines = report.ambiguous, "Lines with empty vendor or account category treated as complex");
    }
    if report.undefined_unit_price > 0 {
        warn!(lines = report.undefined_unit_price, "Lines with undefined unit price");
    }
    if report.duplicate_lines > 0 {
        warn!(lines = report.duplicate_lines, "Repeated PO line ids ignored");
    }
    if report.orphan_postings > 0 {
        warn!(postings = report.orphan_postings, "Postings with no matching PO line");
    }
    for failure in &report.failures {
        warn!(
            po_line_id = %failure.po_line_id,
            engine = failure.engine,
            error_code = failure.error_code,
            "{}",
            failure.message
        );
    }
}

fn log_summary(summary: &RunSummary) {
    info!(
        cost_impact_records = summary.cost_impact_records,
        grir_records = summary.grir_records,
        total_recognized_cost = %summary.total_recognized_cost,
        total_grir_value = %summary.total_grir_value,
        "Run summary"
    );
    for bucket in &summary.buckets {
        info!(bucket = %bucket.label, count = bucket.count, value = %bucket.value, "GRIR aging");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use poflow_core::cost_impact::CostImpactRecord as Record;
    use poflow_core::grir::GrirExposureRecord;
    use poflow_shared::types::PoLineId;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    use super::*;

    const PO: &str = "\
PO Line ID,PO Number,PO Line,Main Vendor SLB Vendor Category,PO Account Assignment Category,Ordered Quantity,Purchase Value USD,PO Receipt Status,PO Valuation Class
P1,4500001,10,NON,K,20,40,OPEN,3021
P2,4500001,20,GLD,K,10,10,OPEN,3021
P3,4500002,10,GLD,K,5,50,CLOSED PO,3021
X1,4500003,10,GLD,K,1,1,OPEN,7800
";

    const GR: &str = "\
PO Line ID,GR Posting Date,GR Effective Quantity
P1,2024-01-01,10
P1,2024-01-03,5
P2,2024-01-02,10
P2,2024-01-05,0
P3,2024-01-01,1
ORPHAN,2024-01-01,1
";

    const IR: &str = "\
PO Line ID,Invoice Posting Date,IR Effective Quantity
P1,2024-01-02,15
P1,2024-01-04,-3
P2,2024-01-01,10
P2,2024-01-03,3
P3,2024-01-02,3
";

    fn snapshot() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    fn setup() -> (TempDir, Pipeline) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PipelineConfig::default();
        config.paths = config.paths.rooted_at(dir.path());
        let raw = &config.paths.raw_dir;
        fs::create_dir_all(raw).unwrap();
        fs::write(config.paths.raw_po_line_items(), PO).unwrap();
        fs::write(config.paths.raw_gr(), GR).unwrap();
        fs::write(config.paths.raw_ir(), IR).unwrap();
        let pipeline = Pipeline::new(config, snapshot());
        (dir, pipeline)
    }

    fn read(dir: &TempDir, relative: &str) -> String {
        fs::read_to_string(dir.path().join(relative)).unwrap()
    }

    #[test]
    fn test_full_run_summary() {
        let (_dir, pipeline) = setup();
        let summary = pipeline.run(None).unwrap().unwrap();

        // P1: 4 complex records; P2 and P3: one GR record each.
        assert_eq!(summary.cost_impact_records, 6);
        assert_eq!(summary.total_recognized_cost, dec!(50));
        assert_eq!(summary.grir_records, 1);
        assert_eq!(summary.total_grir_value, dec!(3));
        assert_eq!(summary.buckets[0].label, "<1 month");
        assert_eq!(summary.buckets[0].count, 1);
    }

    #[test]
    fn test_full_run_outputs() {
        let (dir, pipeline) = setup();
        pipeline.run(None).unwrap();

        let grir = read(&dir, "import-ready/grir_exposures.csv");
        assert_eq!(
            grir,
            "po_line_id,grir_qty,grir_value,first_exposure_date,days_open,time_bucket,snapshot_date\n\
             P2,3,3,2024-01-03,28,<1 month,2024-01-31\n"
        );

        let transactions = read(&dir, "import-ready/po_transactions.csv");
        assert_eq!(transactions.lines().count(), 7);

        let lines = read(&dir, "import-ready/po_line_items.csv");
        assert_eq!(lines.lines().count(), 4);
        assert!(!lines.contains("X1"));
        let p1 = lines.lines().find(|l| l.starts_with("P1,")).unwrap();
        assert!(p1.ends_with(",5,10,30,0.75,false,false,false,false,false,open"), "{p1}");
        let p3 = lines.lines().find(|l| l.starts_with("P3,")).unwrap();
        assert!(p3.ends_with(",0,0,10,0.2,false,false,false,false,true,closed"), "{p3}");
    }

    #[test]
    fn test_overflowing_simple_line_does_not_abort_run() {
        let (dir, pipeline) = setup();
        fs::write(
            dir.path().join("raw/gr table.csv"),
            "PO Line ID,GR Posting Date,GR Effective Quantity\n\
             P1,2024-01-01,10\n\
             P2,2024-01-02,50000000000000000000000000000\n\
             P2,2024-01-03,50000000000000000000000000000\n",
        )
        .unwrap();

        let summary = pipeline.run(None).unwrap().unwrap();
        assert_eq!(summary.grir_records, 0);

        let transactions = read(&dir, "import-ready/po_transactions.csv");
        assert!(transactions.lines().all(|l| !l.starts_with("P2,")));
        let lines = read(&dir, "import-ready/po_line_items.csv");
        let p2 = lines.lines().find(|l| l.starts_with("P2,")).unwrap();
        assert!(p2.ends_with(",10,10,0,0,false,false,false,false,false,open"), "{p2}");
    }

    #[test]
    fn test_stage_one_drops_orphans_and_zero_quantity() {
        let (dir, pipeline) = setup();
        assert_eq!(pipeline.run(Some(Stage::Clean)).unwrap(), None);

        let gr = read(&dir, "intermediate/gr_postings.csv");
        assert_eq!(gr.lines().count(), 5);
        assert!(!gr.contains("ORPHAN"));
        assert!(gr.contains("P2,2024-01-02,10,10"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let (dir, pipeline) = setup();
        pipeline.run(None).unwrap();
        let first: Vec<String> = ["po_line_items", "po_transactions", "grir_exposures"]
            .iter()
            .map(|name| read(&dir, &format!("import-ready/{name}.csv")))
            .collect();

        pipeline.run(None).unwrap();
        let second: Vec<String> = ["po_line_items", "po_transactions", "grir_exposures"]
            .iter()
            .map(|name| read(&dir, &format!("import-ready/{name}.csv")))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_raw_input_is_fatal() {
        let (dir, pipeline) = setup();
        fs::remove_file(dir.path().join("raw/gr table.csv")).unwrap();

        let err = pipeline.run(None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("gr table.csv"));
        assert!(!dir.path().join("intermediate").exists());
    }

    #[test]
    fn test_transform_without_clean_is_missing_input() {
        let (_dir, pipeline) = setup();
        let err = pipeline.run(Some(Stage::Transform)).unwrap_err();
        assert!(matches!(err, AppError::MissingInput(_)));
    }

    #[test]
    fn test_contract_violation_blocks_import_files() {
        let (dir, pipeline) = setup();
        pipeline.run(Some(Stage::Clean)).unwrap();
        pipeline.run(Some(Stage::Transform)).unwrap();

        // An exposure on a complex line must never reach the import files.
        let paths = pipeline.config.paths.clone();
        GrirRepository::new(paths)
            .save(&[GrirExposureRecord {
                po_line_id: PoLineId::from("P1"),
                grir_qty: dec!(1),
                grir_value: dec!(2),
                first_exposure_date: None,
                days_open: 0,
                time_bucket: "<1 month".into(),
                snapshot_date: snapshot(),
            }])
            .unwrap();

        let err = pipeline.run(Some(Stage::Prepare)).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert!(!dir.path().join("import-ready/grir_exposures.csv").exists());
    }

    #[test]
    fn test_prepare_stage_alone_reports_loaded_totals() {
        let (_dir, pipeline) = setup();
        pipeline.run(Some(Stage::Clean)).unwrap();
        pipeline.run(Some(Stage::Transform)).unwrap();

        let records: Vec<Record> = pipeline.cost_impact.load().unwrap();
        let summary = pipeline.run(Some(Stage::Prepare)).unwrap().unwrap();
        assert_eq!(summary.cost_impact_records, records.len());
        assert_eq!(summary.total_recognized_cost, dec!(50));
    }
}
