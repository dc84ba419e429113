//! Pipeline configuration management.
//!
//! Every mapping table and business constant the pipeline uses lives here and
//! is passed explicitly into the cleaners, the classifier, and the engines.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Simple/Complex classification and closed-status rules.
    #[serde(default)]
    pub classification: ClassificationConfig,
    /// GRIR aging buckets.
    #[serde(default)]
    pub grir: GrirConfig,
    /// Stage 1 cleaning tables.
    #[serde(default)]
    pub cleaning: CleaningConfig,
    /// As-of date for GRIR aging. Defaults to the run date.
    #[serde(default)]
    pub snapshot_date: Option<NaiveDate>,
    /// Reduce PO lines on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            classification: ClassificationConfig::default(),
            grir: GrirConfig::default(),
            cleaning: CleaningConfig::default(),
            snapshot_date: None,
            parallel: default_parallel(),
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the raw extracts.
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    /// Directory for stage 1 and stage 2 outputs.
    #[serde(default = "default_intermediate_dir")]
    pub intermediate_dir: PathBuf,
    /// Directory for database-import-ready files.
    #[serde(default = "default_import_ready_dir")]
    pub import_ready_dir: PathBuf,
    /// Raw PO line items file name.
    #[serde(default = "default_po_line_items_file")]
    pub po_line_items_file: String,
    /// Raw goods-receipt file name.
    #[serde(default = "default_gr_file")]
    pub gr_file: String,
    /// Raw invoice-receipt file name.
    #[serde(default = "default_ir_file")]
    pub ir_file: String,
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_intermediate_dir() -> PathBuf {
    PathBuf::from("data/intermediate")
}

fn default_import_ready_dir() -> PathBuf {
    PathBuf::from("data/import-ready")
}

fn default_po_line_items_file() -> String {
    "po line items.csv".to_string()
}

fn default_gr_file() -> String {
    "gr table.csv".to_string()
}

fn default_ir_file() -> String {
    "invoice table.csv".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            intermediate_dir: default_intermediate_dir(),
            import_ready_dir: default_import_ready_dir(),
            po_line_items_file: default_po_line_items_file(),
            gr_file: default_gr_file(),
            ir_file: default_ir_file(),
        }
    }
}

impl PathsConfig {
    /// Re-roots all three directories under `data_dir`.
    #[must_use]
    pub fn rooted_at(mut self, data_dir: &Path) -> Self {
        self.raw_dir = data_dir.join("raw");
        self.intermediate_dir = data_dir.join("intermediate");
        self.import_ready_dir = data_dir.join("import-ready");
        self
    }

    /// Full path of the raw PO line items extract.
    #[must_use]
    pub fn raw_po_line_items(&self) -> PathBuf {
        self.raw_dir.join(&self.po_line_items_file)
    }

    /// Full path of the raw goods-receipt extract.
    #[must_use]
    pub fn raw_gr(&self) -> PathBuf {
        self.raw_dir.join(&self.gr_file)
    }

    /// Full path of the raw invoice-receipt extract.
    #[must_use]
    pub fn raw_ir(&self) -> PathBuf {
        self.raw_dir.join(&self.ir_file)
    }
}

/// Simple/Complex classification rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Vendor category of Simple POs.
    #[serde(default = "default_simple_vendor_category")]
    pub simple_vendor_category: String,
    /// Account-assignment categories of Simple POs.
    #[serde(default = "default_simple_account_categories")]
    pub simple_account_categories: Vec<String>,
    /// Receipt status marking a fully settled PO line.
    #[serde(default = "default_closed_receipt_status")]
    pub closed_receipt_status: String,
}

fn default_simple_vendor_category() -> String {
    "GLD".to_string()
}

fn default_simple_account_categories() -> Vec<String> {
    ["K", "P", "S", "V"].iter().map(ToString::to_string).collect()
}

fn default_closed_receipt_status() -> String {
    "CLOSED PO".to_string()
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            simple_vendor_category: default_simple_vendor_category(),
            simple_account_categories: default_simple_account_categories(),
            closed_receipt_status: default_closed_receipt_status(),
        }
    }
}

/// One aging bucket: exposures open for at most `max_days` get `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketThreshold {
    /// Inclusive upper bound in days.
    pub max_days: i64,
    /// Bucket label written to the output.
    pub label: String,
}

/// GRIR aging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrirConfig {
    /// Ascending thresholds.
    #[serde(default = "default_buckets")]
    pub buckets: Vec<BucketThreshold>,
    /// Label for anything older than the last threshold.
    #[serde(default = "default_overflow_label")]
    pub overflow_label: String,
}

fn default_buckets() -> Vec<BucketThreshold> {
    [
        (30, "<1 month"),
        (90, "1-3 months"),
        (180, "3-6 months"),
        (365, "6-12 months"),
    ]
    .into_iter()
    .map(|(max_days, label)| BucketThreshold {
        max_days,
        label: label.to_string(),
    })
    .collect()
}

fn default_overflow_label() -> String {
    ">1 year".to_string()
}

impl Default for GrirConfig {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
            overflow_label: default_overflow_label(),
        }
    }
}

/// A code-to-name row of a mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMapping {
    /// Source code (vendor id, plant code, alias).
    pub code: String,
    /// Replacement value.
    pub value: String,
}

impl CodeMapping {
    fn table(rows: &[(&str, &str)]) -> Vec<Self> {
        rows.iter()
            .map(|(code, value)| Self {
                code: (*code).to_string(),
                value: (*value).to_string(),
            })
            .collect()
    }
}

/// Stage 1 cleaning tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Valuation classes whose lines are dropped.
    #[serde(default = "default_excluded_valuation_classes")]
    pub excluded_valuation_classes: Vec<i64>,
    /// NIS level descriptions whose lines are dropped.
    #[serde(default = "default_excluded_nis_levels")]
    pub excluded_nis_levels: Vec<String>,
    /// Valuation class whose empty NIS level gets `nis_fill_value`.
    #[serde(default = "default_nis_fill_valuation_class")]
    pub nis_fill_valuation_class: i64,
    /// NIS level assigned by the fill rule.
    #[serde(default = "default_nis_fill_value")]
    pub nis_fill_value: String,
    /// NIS level rewrites.
    #[serde(default = "default_nis_aliases")]
    pub nis_aliases: Vec<CodeMapping>,
    /// Vendor id to vendor name (hub vendors).
    #[serde(default = "default_vendor_names")]
    pub vendor_names: Vec<CodeMapping>,
    /// Plant code to location.
    #[serde(default = "default_plant_locations")]
    pub plant_locations: Vec<CodeMapping>,
}

fn default_excluded_valuation_classes() -> Vec<i64> {
    vec![7800, 7900, 5008]
}

fn default_excluded_nis_levels() -> Vec<String> {
    vec![
        "Compensation Business Delivery".to_string(),
        "Compensation Business Enablement".to_string(),
    ]
}

fn default_nis_fill_valuation_class() -> i64 {
    3021
}

fn default_nis_fill_value() -> String {
    "Materials and Supplies".to_string()
}

fn default_nis_aliases() -> Vec<CodeMapping> {
    CodeMapping::table(&[("Lease and Rent Total", "Lease and Rent")])
}

fn default_vendor_names() -> Vec<CodeMapping> {
    CodeMapping::table(&[
        ("P9516", "Dubai Hub"),
        ("P9109", "Houston Hub"),
        ("P9517", "Shanghai Hub"),
        ("P9518", "Singapore Hub"),
        ("P9514", "Canada Hub"),
        ("P9519", "Japan Hub"),
        ("P9097", "Rotterdam Hub"),
        ("P9107", "NAM RDC"),
        ("P9071", "PPCU"),
        ("P9052", "SRC"),
        ("P9057", "SKK"),
        ("P9060", "SRPC"),
        ("P9036", "HFE"),
        ("P9035", "HCS"),
        ("P9086", "ONESUBSEA"),
        ("P9064", "PPCS"),
        ("P9066", "SWTC"),
        ("P9562", "QRTC"),
        ("P9032", "FCS"),
    ])
}

fn default_plant_locations() -> Vec<CodeMapping> {
    CodeMapping::table(&[
        ("3601", "Perth"),
        ("3606", "Jandakot"),
        ("3608", "Kewdale"),
        ("3609", "Toowoomba"),
        ("3610", "Roma"),
        ("3611", "Dampier"),
        ("3613", "Roma"),
        ("3614", "Moomba"),
        ("3617", "Brisbane"),
        ("3649", "Port Moresby"),
        ("3650", "New Plymouth"),
        ("3651", "Dili"),
        ("3880", "Port Moresby"),
        ("3881", "New Plymouth"),
        ("3882", "Jandakot"),
        ("3892", "Roma"),
        ("3893", "Dampier"),
        ("3916", "Adelaide"),
        ("4039", "Roma"),
        ("4062", "Toowoomba"),
        ("4063", "Dampier"),
    ])
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            excluded_valuation_classes: default_excluded_valuation_classes(),
            excluded_nis_levels: default_excluded_nis_levels(),
            nis_fill_valuation_class: default_nis_fill_valuation_class(),
            nis_fill_value: default_nis_fill_value(),
            nis_aliases: default_nis_aliases(),
            vendor_names: default_vendor_names(),
            plant_locations: default_plant_locations(),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// the optional `explicit` file, then `POFLOW__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is
    /// inconsistent.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(config::Environment::with_prefix("POFLOW").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks invariants the engines rely on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` describing the first broken rule.
    pub fn validate(&self) -> AppResult<()> {
        if self.classification.simple_account_categories.is_empty() {
            return Err(AppError::Config(
                "classification.simple_account_categories must not be empty".into(),
            ));
        }
        if self.grir.buckets.is_empty() {
            return Err(AppError::Config("grir.buckets must not be empty".into()));
        }
        if self
            .grir
            .buckets
            .windows(2)
            .any(|pair| pair[0].max_days >= pair[1].max_days)
        {
            return Err(AppError::Config(
                "grir.buckets thresholds must be strictly ascending".into(),
            ));
        }
        if self.grir.buckets.iter().any(|b| b.max_days < 0) {
            return Err(AppError::Config(
                "grir.buckets thresholds must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_business_rules() {
        let config = PipelineConfig::default();
        assert_eq!(config.classification.simple_vendor_category, "GLD");
        assert_eq!(
            config.classification.simple_account_categories,
            vec!["K", "P", "S", "V"]
        );
        assert_eq!(config.classification.closed_receipt_status, "CLOSED PO");
        assert_eq!(config.grir.buckets.len(), 4);
        assert_eq!(config.grir.overflow_label, ">1 year");
        assert_eq!(config.cleaning.excluded_valuation_classes, vec![7800, 7900, 5008]);
        assert!(config.snapshot_date.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rooted_paths() {
        let paths = PathsConfig::default().rooted_at(Path::new("/tmp/run"));
        assert_eq!(paths.raw_gr(), PathBuf::from("/tmp/run/raw/gr table.csv"));
        assert_eq!(
            paths.raw_po_line_items(),
            PathBuf::from("/tmp/run/raw/po line items.csv")
        );
        assert_eq!(paths.import_ready_dir, PathBuf::from("/tmp/run/import-ready"));
    }

    #[test]
    fn test_validate_rejects_unordered_buckets() {
        let mut config = PipelineConfig::default();
        config.grir.buckets.swap(0, 1);
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_categories() {
        let mut config = PipelineConfig::default();
        config.classification.simple_account_categories.clear();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        temp_env::with_vars_unset(
            ["POFLOW__SNAPSHOT_DATE", "POFLOW__PARALLEL", "RUN_MODE"],
            || {
                let config = PipelineConfig::load(None).expect("defaults load");
                assert!(config.parallel);
                assert_eq!(config.paths.gr_file, "gr table.csv");
            },
        );
    }

    #[test]
    fn test_load_reads_environment_overrides() {
        temp_env::with_vars(
            [
                ("POFLOW__SNAPSHOT_DATE", Some("2025-01-31")),
                ("POFLOW__PARALLEL", Some("false")),
                (
                    "POFLOW__CLASSIFICATION__CLOSED_RECEIPT_STATUS",
                    Some("Closed"),
                ),
            ],
            || {
                let config = PipelineConfig::load(None).expect("env load");
                assert_eq!(config.snapshot_date, NaiveDate::from_ymd_opt(2025, 1, 31));
                assert!(!config.parallel);
                assert_eq!(config.classification.closed_receipt_status, "Closed");
            },
        );
    }
}
