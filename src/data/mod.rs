/// Data layer: core types, providers, filtering and aggregation.
///
/// Architecture:
/// ```text
///  embedded titles        .parquet / .json / .csv
///        │                        │
///        ▼                        ▼
///   ┌──────────┐            ┌──────────┐
///   │ catalog  │            │  loader  │   rows → Table (seeded ratings)
///   └──────────┘            └──────────┘
///        │                        │
///        └───────────┬────────────┘
///                    ▼
///              ┌──────────┐
///              │  filter  │  FilterCriteria → matching indices
///              └──────────┘
///                    │
///                    ▼
///             ┌────────────┐
///             │ aggregate  │  subset + type / genre / year counts
///             └────────────┘
/// ```
pub mod aggregate;
pub mod catalog;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod rng;
