//! csv-forge: typed CSV ingestion and serialization.
//!
//! A hand-written CSV engine: a quote-aware tokenizer, a line
//! partitioner that repairs structurally ambiguous cell boundaries, a
//! per-column type-inference ladder, and a typed row materializer,
//! plus a quoting serializer for the reverse direction.
//!
//! # Quick Start
//!
//! ```
//! use csv_forge::{ParseOptions, Table, TypeTag, Value};
//!
//! let text = "id,score,name\n1,3.5,Alice\n2,4.0,Bob\n";
//! let table = Table::load(text, &ParseOptions::new()).unwrap();
//!
//! assert_eq!(table.titles(), vec!["id", "score", "name"]);
//! assert_eq!(table.columns()[1].declared_type, TypeTag::Float);
//! assert_eq!(table.cell(0, 2), Some(Value::Text("Alice".into())));
//! ```
//!
//! # Two parsing speeds
//!
//! The default mode tokenizes the whole input up front and tolerates
//! messy structure: quoted cells spanning lines, doubled-quote
//! escapes, missing cells at separator boundaries. Fast mode
//! ([`ParseOptions::fast_mode`]) splits line by line assuming
//! well-formed input, optionally out of order
//! ([`ParseOptions::ordered_fast_mode`]).
//!
//! # Error policy
//!
//! Recoverable errors (failed conversions, adapterless declared
//! columns, inconsistent row widths, bad appends) route through an
//! [`ErrorPolicy`]; the default policy fails fast, [`LenientPolicy`]
//! recovers everywhere, and callers can implement the trait for
//! anything in between. An unterminated quote is always fatal.

mod column;
mod encoding;
mod engine;
mod error;
mod event;
mod infer;
mod materialize;
mod options;
mod policy;
mod schema;
mod serialize;
mod table;
mod value;

pub use column::{Adapter, ColumnSpec};
pub use error::{Result, TableError};
pub use event::{ChangeEvent, ChangeKind, TableListener};
pub use options::ParseOptions;
pub use policy::{ErrorPolicy, LenientPolicy, StrictPolicy};
pub use encoding::decode;
pub use table::Table;
pub use value::{TypeTag, Value};
