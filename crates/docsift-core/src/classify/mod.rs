//! Keyword-based document classification.
//!
//! Classification is a fixed, ordered rule table over the lower-cased
//! document text; the first matching rule wins. Several recognizable
//! document kinds (application forms, identity documents, utility bills)
//! carry no extraction rules and resolve to [`DocumentCategory::Other`],
//! which downstream treats as "no specific rules apply". Classification
//! never fails: anything unrecognized is `Other`.

use tracing::{debug, info};

use crate::models::config::ClassifierConfig;
use crate::models::fields::{DocumentCategory, DocumentMetadata};

/// Keyword rules in priority order. Application forms and identity
/// documents outrank the financial categories so that, e.g., a funding
/// application quoting a bank statement stays unextractable.
const KEYWORD_RULES: &[(&[&str], DocumentCategory)] = &[
    (
        &["application form", "funding application", "merchant application"],
        DocumentCategory::Other,
    ),
    (
        &["passport", "driver's license", "driver license", "identity card"],
        DocumentCategory::Other,
    ),
    (
        &["business license", "operating permit", "certificate of authority"],
        DocumentCategory::BusinessLicense,
    ),
    (
        &["bank statement", "account statement", "statement of account"],
        DocumentCategory::BankStatement,
    ),
    (
        &["tax return", "form 1040", "form 1120", "form 1065", "internal revenue service"],
        DocumentCategory::TaxReturn,
    ),
    (
        &["balance sheet", "income statement", "profit and loss", "financial statement", "statement of operations"],
        DocumentCategory::FinancialStatement,
    ),
    (
        &["utility bill", "electricity bill", "water bill", "gas bill"],
        DocumentCategory::Other,
    ),
];

/// File-name hints tried when no text keyword matches.
const FILE_NAME_RULES: &[(&[&str], DocumentCategory)] = &[
    (&["1040", "1120", "tax"], DocumentCategory::TaxReturn),
    (&["license", "permit"], DocumentCategory::BusinessLicense),
    (&["balance_sheet", "balance-sheet", "financial"], DocumentCategory::FinancialStatement),
    (&["statement"], DocumentCategory::BankStatement),
];

/// Rule-based document classifier.
#[derive(Debug, Clone, Default)]
pub struct DocumentClassifier {
    config: ClassifierConfig,
}

impl DocumentClassifier {
    /// Create a classifier with the given configuration.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Assign a category from document text and upload metadata.
    pub fn classify(&self, text: &str, metadata: &DocumentMetadata) -> DocumentCategory {
        let category = self.apply_rules(text, metadata);
        info!("classified document as {category}");
        category
    }

    fn apply_rules(&self, text: &str, metadata: &DocumentMetadata) -> DocumentCategory {
        let lower = text.to_lowercase();

        for (keywords, category) in KEYWORD_RULES {
            if let Some(keyword) = keywords.iter().find(|kw| lower.contains(*kw)) {
                debug!("matched keyword \"{keyword}\"");
                return *category;
            }
        }

        if let Some(file_name) = metadata.file_name.as_deref() {
            let file_name = file_name.to_lowercase();
            for (hints, category) in FILE_NAME_RULES {
                if let Some(hint) = hints.iter().find(|h| file_name.contains(*h)) {
                    debug!("matched file-name hint \"{hint}\"");
                    return *category;
                }
            }
        }

        if let Some(size) = metadata.file_size {
            if size > self.config.large_document_threshold {
                debug!("{size}-byte document exceeds the large-document threshold");
                return DocumentCategory::Other;
            }
        }

        DocumentCategory::Other
    }
}
