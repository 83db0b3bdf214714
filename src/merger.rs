// 🔀 Merge Engine - reconcile two record sets by customer identifier
//
// Result = base order, then incoming-only records in incoming order.
// Matching records take every non-identifier field from the incoming side.

use crate::record::Record;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

// ============================================================================
// EMPTY IDENTIFIER POLICY
// ============================================================================

/// How records without an identifier take part in matching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyIdPolicy {
    /// `""` is an ordinary key: all identifier-less records collapse onto
    /// the first one seen
    #[default]
    Collide,

    /// Never match: every incoming record without an identifier is appended
    Distinct,
}

impl EmptyIdPolicy {
    pub fn name(&self) -> &str {
        match self {
            EmptyIdPolicy::Collide => "collide",
            EmptyIdPolicy::Distinct => "distinct",
        }
    }
}

// ============================================================================
// MERGE REPORT
// ============================================================================

#[derive(Debug, Clone)]
pub struct MergeReport {
    pub base_count: usize,
    pub incoming_count: usize,
    /// Result records overwritten by an incoming record (counted per overwrite)
    pub updated: usize,
    /// Incoming records appended because nothing matched
    pub appended: usize,
    pub output_count: usize,
    pub empty_id_policy: EmptyIdPolicy,
    pub merged_at: DateTime<Utc>,
}

impl MergeReport {
    pub fn summary(&self) -> String {
        format!(
            "Merged {} base + {} incoming records: {} updated, {} appended, {} written",
            self.base_count, self.incoming_count, self.updated, self.appended, self.output_count
        )
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub records: Vec<Record>,
    pub report: MergeReport,
}

// ============================================================================
// MERGE ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    pub empty_id_policy: EmptyIdPolicy,
}

impl MergeEngine {
    pub fn new() -> Self {
        MergeEngine::default()
    }

    pub fn with_policy(empty_id_policy: EmptyIdPolicy) -> Self {
        MergeEngine { empty_id_policy }
    }

    /// Merge `incoming` into `base`.
    ///
    /// The identifier index is built once from the base and grows with each
    /// appended record, so lookups resolve to the same record a front-to-back
    /// scan of the result would find first.
    pub fn merge(&self, base: Vec<Record>, incoming: Vec<Record>) -> MergeOutcome {
        let base_count = base.len();
        let incoming_count = incoming.len();

        let mut result = base;
        result.reserve(incoming_count);

        let mut index: HashMap<String, usize> = HashMap::with_capacity(result.len());
        for (pos, record) in result.iter().enumerate() {
            if self.is_indexable(record) {
                index.entry(record.key().to_string()).or_insert(pos);
            }
        }

        let mut updated = 0;
        let mut appended = 0;

        for record in incoming {
            if !self.is_indexable(&record) {
                result.push(record);
                appended += 1;
                continue;
            }

            match index.get(record.key()).copied() {
                Some(pos) => {
                    result[pos].overwrite_from(&record);
                    updated += 1;
                }
                None => {
                    index.insert(record.key().to_string(), result.len());
                    result.push(record);
                    appended += 1;
                }
            }
        }

        let report = MergeReport {
            base_count,
            incoming_count,
            updated,
            appended,
            output_count: result.len(),
            empty_id_policy: self.empty_id_policy,
            merged_at: Utc::now(),
        };

        MergeOutcome {
            records: result,
            report,
        }
    }

    fn is_indexable(&self, record: &Record) -> bool {
        record.has_identifier() || self.empty_id_policy == EmptyIdPolicy::Collide
    }
}

/// Merge with the default engine, returning only the records
pub fn merge(base: Vec<Record>, incoming: Vec<Record>) -> Vec<Record> {
    MergeEngine::new().merge(base, incoming).records
}
