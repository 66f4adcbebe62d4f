// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AnnotatedTransaction, FilterCriteria, Page};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct Projection {
    pub rows: Vec<AnnotatedTransaction>,
    pub total_matched: usize,
}

/// Select and paginate annotated rows. Criteria are AND-combined, each
/// independently optional; the date range is inclusive on both ends (dates
/// are whole calendar days, so `<= to_date` keeps the entire end day).
/// Running balances pass through untouched — this is a view, never a
/// recomputation.
pub fn project(
    annotated: &[AnnotatedTransaction],
    criteria: &FilterCriteria,
    page: Page,
) -> Projection {
    let matcher = criteria
        .free_text
        .as_deref()
        .and_then(|text| Regex::new(&format!("(?i){}", regex::escape(text.trim()))).ok());

    let matched: Vec<&AnnotatedTransaction> = annotated
        .iter()
        .filter(|row| {
            let tx = &row.tx;
            if let Some(from) = criteria.from_date {
                if tx.date < from {
                    return false;
                }
            }
            if let Some(to) = criteria.to_date {
                if tx.date > to {
                    return false;
                }
            }
            if let Some(vt) = &criteria.voucher_type {
                if !tx.voucher_type.eq_ignore_ascii_case(vt) {
                    return false;
                }
            }
            if let Some(no) = &criteria.voucher_no {
                if !tx.voucher_no.eq_ignore_ascii_case(no) {
                    return false;
                }
            }
            if criteria.free_text.is_some() {
                let hay = format!(
                    "{} {} {}",
                    tx.voucher_no,
                    tx.party.as_deref().unwrap_or(""),
                    tx.voucher_type
                );
                match &matcher {
                    Some(re) if re.is_match(&hay) => {}
                    _ => return false,
                }
            }
            true
        })
        .collect();

    let total_matched = matched.len();
    let rows = if page.size == 0 {
        matched.into_iter().cloned().collect()
    } else {
        matched
            .into_iter()
            .skip(page.index * page.size)
            .take(page.size)
            .cloned()
            .collect()
    };
    Projection {
        rows,
        total_matched,
    }
}
