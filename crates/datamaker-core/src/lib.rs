//! Core contracts for the DataMaker client.
//!
//! This crate defines the closed field catalogue, the template model and the
//! account-owned endpoint types shared by the client and the CLI. It performs
//! no I/O.

pub mod endpoint;
pub mod error;
pub mod fields;
pub mod template;

pub use endpoint::{CustomEndpoint, Endpoint, EndpointRef, Headers};
pub use error::{FieldError, Result};
pub use fields::{
    AbbrOptions, AccountNumberOptions, AddressOptions, AiOptions, ApiResponseOptions,
    BooleanOptions, CreditCardOptions, CustomOptions, DatetimeOptions, DbResponseOptions,
    DerivedOptions, Field, FieldKind, FieldType, FloatOptions, FormatOptions, IbanOptions,
    LengthRangeOptions, LoremOptions, MappedOptions, NestedOptions, NullOptions, NumberOptions,
    RegExpOptions, Sex, SexOptions, TemplateRefOptions, UuidOptions, WordsOptions,
};
pub use template::{AccountTemplate, Record, Template, TemplateWarning, normalize_quantity};

/// Record count used when a template does not carry a usable quantity.
pub const DEFAULT_QUANTITY: u32 = 1;
