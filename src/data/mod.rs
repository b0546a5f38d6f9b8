/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  parse + validate → Dataset (memoized per session)
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  Dataset  │  Vec<Record> + derived Age_Range, value indexes
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  filter   │  platform ∧ age bucket ∧ gender → filtered indices
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │ aggregate │  metric cards, group-bys, numeric columns
///    └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
