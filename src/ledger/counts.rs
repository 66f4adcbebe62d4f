// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AnnotatedTransaction, TypeCount};
use std::collections::{BTreeMap, HashMap};

/// Group annotated rows by voucher type into a count breakdown.
///
/// `label_map` renames raw types for display ("Invoice" -> "Sales");
/// unmapped types keep their raw label. A supplied authoritative breakdown
/// is returned verbatim, same override pattern as the summary reconciler.
pub fn aggregate_counts(
    annotated: &[AnnotatedTransaction],
    label_map: &HashMap<String, String>,
    authoritative: Option<&TypeCount>,
) -> TypeCount {
    if let Some(auth) = authoritative {
        return auth.clone();
    }
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for row in annotated {
        let raw = if row.tx.voucher_type.is_empty() {
            "(untyped)"
        } else {
            row.tx.voucher_type.as_str()
        };
        let label = label_map
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string());
        *counts.entry(label).or_insert(0) += 1;
    }
    let total = counts.values().sum();
    TypeCount { counts, total }
}
