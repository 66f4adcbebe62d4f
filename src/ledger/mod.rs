// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger core: one reusable pipeline over immutable in-memory data.
//!
//! raw records -> [normalize] -> canonical rows -> [accumulate] ->
//! annotated rows -> { [reconcile], [aggregate_counts] } and -> [project].
//!
//! Every function here is pure and synchronous; data acquisition lives
//! with the callers (src/db.rs, src/commands/).

pub mod accumulate;
pub mod counts;
pub mod filter;
pub mod normalize;
pub mod reconcile;
