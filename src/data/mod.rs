/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  header + rows of CellValue
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  drop rows with nulls in the categorical columns
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
