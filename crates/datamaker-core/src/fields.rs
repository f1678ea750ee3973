//! Closed catalogue of field generators and their option contracts.
//!
//! A field is `{ name, type, options? }` on the wire. The `type` string selects
//! exactly one [`FieldKind`] variant and that variant alone decides which
//! option keys are legal. Unknown option keys and unknown types are rejected.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{FieldError, Result};

/// Discriminant of every generator the service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldType {
    Words,
    Uuid,
    Number,
    Float,
    Boolean,
    Ai,
    Custom,
    Date,
    Name,
    FirstName,
    LastName,
    Email,
    Address,
    City,
    Country,
    PhoneNumber,
    ZipCode,
    Sex,
    Gender,
    Avatar,
    JobTitle,
    RandomString,
    AccountName,
    Iban,
    CurrencyName,
    CreditCardNumber,
    AccountNumber,
    Password,
    DomainName,
    Color,
    Emoji,
    Ipv4,
    MacAddress,
    Url,
    Product,
    Department,
    ProductName,
    Datetime,
    Month,
    Weekday,
    TimeZone,
    Lorem,
    RegExp,
    MongoObjectId,
    Null,
    Derived,
    Template,
    ApiResponse,
    DbResponse,
    Mapped,
    Nested,
}

impl FieldType {
    /// Every catalogue entry, in catalogue order.
    pub const ALL: [FieldType; 51] = [
        FieldType::Words,
        FieldType::Uuid,
        FieldType::Number,
        FieldType::Float,
        FieldType::Boolean,
        FieldType::Ai,
        FieldType::Custom,
        FieldType::Date,
        FieldType::Name,
        FieldType::FirstName,
        FieldType::LastName,
        FieldType::Email,
        FieldType::Address,
        FieldType::City,
        FieldType::Country,
        FieldType::PhoneNumber,
        FieldType::ZipCode,
        FieldType::Sex,
        FieldType::Gender,
        FieldType::Avatar,
        FieldType::JobTitle,
        FieldType::RandomString,
        FieldType::AccountName,
        FieldType::Iban,
        FieldType::CurrencyName,
        FieldType::CreditCardNumber,
        FieldType::AccountNumber,
        FieldType::Password,
        FieldType::DomainName,
        FieldType::Color,
        FieldType::Emoji,
        FieldType::Ipv4,
        FieldType::MacAddress,
        FieldType::Url,
        FieldType::Product,
        FieldType::Department,
        FieldType::ProductName,
        FieldType::Datetime,
        FieldType::Month,
        FieldType::Weekday,
        FieldType::TimeZone,
        FieldType::Lorem,
        FieldType::RegExp,
        FieldType::MongoObjectId,
        FieldType::Null,
        FieldType::Derived,
        FieldType::Template,
        FieldType::ApiResponse,
        FieldType::DbResponse,
        FieldType::Mapped,
        FieldType::Nested,
    ];

    /// Wire name used in the `type` key.
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Words => "Words",
            FieldType::Uuid => "UUID",
            FieldType::Number => "Number",
            FieldType::Float => "Float",
            FieldType::Boolean => "Boolean",
            FieldType::Ai => "AI",
            FieldType::Custom => "Custom",
            FieldType::Date => "Date",
            FieldType::Name => "Name",
            FieldType::FirstName => "First Name",
            FieldType::LastName => "Last Name",
            FieldType::Email => "E-Mail",
            FieldType::Address => "Address",
            FieldType::City => "City",
            FieldType::Country => "Country",
            FieldType::PhoneNumber => "Phone Number",
            FieldType::ZipCode => "Zip Code",
            FieldType::Sex => "Sex",
            FieldType::Gender => "Gender",
            FieldType::Avatar => "Avatar",
            FieldType::JobTitle => "Job Title",
            FieldType::RandomString => "Random String",
            FieldType::AccountName => "Account Name",
            FieldType::Iban => "IBAN",
            FieldType::CurrencyName => "Currency Name",
            FieldType::CreditCardNumber => "Credit Card Number",
            FieldType::AccountNumber => "Account Number",
            FieldType::Password => "Password",
            FieldType::DomainName => "Domain Name",
            FieldType::Color => "Color",
            FieldType::Emoji => "Emoji",
            FieldType::Ipv4 => "IPv4",
            FieldType::MacAddress => "MAC Address",
            FieldType::Url => "URL",
            FieldType::Product => "Product",
            FieldType::Department => "Department",
            FieldType::ProductName => "Product Name",
            FieldType::Datetime => "Datetime",
            FieldType::Month => "Month",
            FieldType::Weekday => "Weekday",
            FieldType::TimeZone => "Time Zone",
            FieldType::Lorem => "Lorem",
            FieldType::RegExp => "RegExp",
            FieldType::MongoObjectId => "MongoDB ObjectID",
            FieldType::Null => "Null",
            FieldType::Derived => "Derived",
            FieldType::Template => "Template",
            FieldType::ApiResponse => "API Response",
            FieldType::DbResponse => "DB Response",
            FieldType::Mapped => "Mapped",
            FieldType::Nested => "Nested",
        }
    }

    /// Look up a catalogue entry by its wire name. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == value)
    }

    /// Whether the options bag must be present for this type.
    pub const fn requires_options(self) -> bool {
        matches!(
            self,
            FieldType::Ai
                | FieldType::Custom
                | FieldType::RegExp
                | FieldType::Derived
                | FieldType::Template
                | FieldType::ApiResponse
                | FieldType::DbResponse
                | FieldType::Mapped
                | FieldType::Nested
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WordsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UuidOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NumberOptions {
    /// Kept as a JSON number so integer bounds stay integers on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    /// Emit the number as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stringify: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FloatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BooleanOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truthy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub falsy: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AiOptions {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomOptions {
    /// Values picked from at random.
    pub values: Vec<String>,
}

/// Shared by `Date`, `Phone Number` and `Zip Code`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Shared by `Name`, `First Name` and `Last Name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SexOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddressOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_full_address: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LengthRangeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IbanOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreditCardOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccountNumberOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DatetimeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past: Option<bool>,
}

/// Shared by `Month` and `Weekday`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AbbrOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbr: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoremOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegExpOptions {
    /// Pattern the generated string must match.
    pub string: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NullOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DerivedOptions {
    /// Template string, e.g. `{{first_name}}@example.com`.
    pub value: String,
}

impl DerivedOptions {
    /// Names referenced through `{{name}}` placeholders, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.value.as_str();
        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };
            let name = after[..end].trim();
            if !name.is_empty() {
                names.push(name);
            }
            rest = &after[end + 2..];
        }
        names
    }
}

/// Options for a field that embeds records produced by another template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplateRefOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    pub array: bool,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApiResponseOptions {
    /// Identifier of an endpoint stored in the account.
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DbResponseOptions {
    /// Identifier of a database connection stored in the account.
    pub connection: String,
    pub sql: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MappedOptions {
    /// Name of the source field whose value is looked up in `map`.
    pub field: String,
    pub map: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NestedOptions {
    pub array: bool,
    pub quantity: u32,
}

/// Marker for catalogue entries that take no options; only `{}` is accepted.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoOptions {}

/// A generator together with the options shape its type allows.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Words(WordsOptions),
    Uuid(UuidOptions),
    Number(NumberOptions),
    Float(FloatOptions),
    Boolean(BooleanOptions),
    Ai(AiOptions),
    Custom(CustomOptions),
    Date(FormatOptions),
    Name(SexOptions),
    FirstName(SexOptions),
    LastName(SexOptions),
    Email,
    Address(AddressOptions),
    City,
    Country,
    PhoneNumber(FormatOptions),
    ZipCode(FormatOptions),
    Sex,
    Gender,
    Avatar,
    JobTitle,
    RandomString(LengthRangeOptions),
    AccountName,
    Iban(IbanOptions),
    CurrencyName,
    CreditCardNumber(CreditCardOptions),
    AccountNumber(AccountNumberOptions),
    Password,
    DomainName,
    Color,
    Emoji,
    Ipv4,
    MacAddress,
    Url,
    Product,
    Department,
    ProductName,
    Datetime(DatetimeOptions),
    Month(AbbrOptions),
    Weekday(AbbrOptions),
    TimeZone,
    Lorem(LoremOptions),
    RegExp(RegExpOptions),
    MongoObjectId,
    Null(NullOptions),
    Derived(DerivedOptions),
    Template(TemplateRefOptions),
    ApiResponse(ApiResponseOptions),
    DbResponse(DbResponseOptions),
    Mapped(MappedOptions),
    Nested(NestedOptions),
}

impl FieldKind {
    /// Check a `type`/`options` pair against the catalogue.
    ///
    /// `options` must be a JSON object when present; `null` counts as absent.
    pub fn from_parts(type_name: &str, options: Option<Value>) -> Result<Self> {
        let field_type = FieldType::parse(type_name)
            .ok_or_else(|| FieldError::UnknownType(type_name.to_string()))?;

        let options = match options {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                return Err(FieldError::InvalidOptions {
                    field_type: field_type.as_str(),
                    message: "options must be a JSON object".to_string(),
                });
            }
        };

        if options.is_none() && field_type.requires_options() {
            return Err(FieldError::MissingOptions {
                field_type: field_type.as_str(),
            });
        }

        let kind = match field_type {
            FieldType::Words => FieldKind::Words(decode(field_type, options)?),
            FieldType::Uuid => FieldKind::Uuid(decode(field_type, options)?),
            FieldType::Number => FieldKind::Number(decode(field_type, options)?),
            FieldType::Float => FieldKind::Float(decode(field_type, options)?),
            FieldType::Boolean => FieldKind::Boolean(decode(field_type, options)?),
            FieldType::Ai => FieldKind::Ai(decode(field_type, options)?),
            FieldType::Custom => FieldKind::Custom(decode(field_type, options)?),
            FieldType::Date => FieldKind::Date(decode(field_type, options)?),
            FieldType::Name => FieldKind::Name(decode(field_type, options)?),
            FieldType::FirstName => FieldKind::FirstName(decode(field_type, options)?),
            FieldType::LastName => FieldKind::LastName(decode(field_type, options)?),
            FieldType::Email => unit(field_type, options, FieldKind::Email)?,
            FieldType::Address => FieldKind::Address(decode(field_type, options)?),
            FieldType::City => unit(field_type, options, FieldKind::City)?,
            FieldType::Country => unit(field_type, options, FieldKind::Country)?,
            FieldType::PhoneNumber => FieldKind::PhoneNumber(decode(field_type, options)?),
            FieldType::ZipCode => FieldKind::ZipCode(decode(field_type, options)?),
            FieldType::Sex => unit(field_type, options, FieldKind::Sex)?,
            FieldType::Gender => unit(field_type, options, FieldKind::Gender)?,
            FieldType::Avatar => unit(field_type, options, FieldKind::Avatar)?,
            FieldType::JobTitle => unit(field_type, options, FieldKind::JobTitle)?,
            FieldType::RandomString => FieldKind::RandomString(decode(field_type, options)?),
            FieldType::AccountName => unit(field_type, options, FieldKind::AccountName)?,
            FieldType::Iban => FieldKind::Iban(decode(field_type, options)?),
            FieldType::CurrencyName => unit(field_type, options, FieldKind::CurrencyName)?,
            FieldType::CreditCardNumber => {
                FieldKind::CreditCardNumber(decode(field_type, options)?)
            }
            FieldType::AccountNumber => FieldKind::AccountNumber(decode(field_type, options)?),
            FieldType::Password => unit(field_type, options, FieldKind::Password)?,
            FieldType::DomainName => unit(field_type, options, FieldKind::DomainName)?,
            FieldType::Color => unit(field_type, options, FieldKind::Color)?,
            FieldType::Emoji => unit(field_type, options, FieldKind::Emoji)?,
            FieldType::Ipv4 => unit(field_type, options, FieldKind::Ipv4)?,
            FieldType::MacAddress => unit(field_type, options, FieldKind::MacAddress)?,
            FieldType::Url => unit(field_type, options, FieldKind::Url)?,
            FieldType::Product => unit(field_type, options, FieldKind::Product)?,
            FieldType::Department => unit(field_type, options, FieldKind::Department)?,
            FieldType::ProductName => unit(field_type, options, FieldKind::ProductName)?,
            FieldType::Datetime => FieldKind::Datetime(decode(field_type, options)?),
            FieldType::Month => FieldKind::Month(decode(field_type, options)?),
            FieldType::Weekday => FieldKind::Weekday(decode(field_type, options)?),
            FieldType::TimeZone => unit(field_type, options, FieldKind::TimeZone)?,
            FieldType::Lorem => FieldKind::Lorem(decode(field_type, options)?),
            FieldType::RegExp => FieldKind::RegExp(decode(field_type, options)?),
            FieldType::MongoObjectId => unit(field_type, options, FieldKind::MongoObjectId)?,
            FieldType::Null => FieldKind::Null(decode(field_type, options)?),
            FieldType::Derived => FieldKind::Derived(decode(field_type, options)?),
            FieldType::Template => FieldKind::Template(decode(field_type, options)?),
            FieldType::ApiResponse => FieldKind::ApiResponse(decode(field_type, options)?),
            FieldType::DbResponse => FieldKind::DbResponse(decode(field_type, options)?),
            FieldType::Mapped => FieldKind::Mapped(decode(field_type, options)?),
            FieldType::Nested => FieldKind::Nested(decode(field_type, options)?),
        };

        Ok(kind)
    }

    /// Derived field computed from a `{{name}}` template string.
    pub fn derived(value: impl Into<String>) -> Self {
        FieldKind::Derived(DerivedOptions {
            value: value.into(),
        })
    }

    /// Field whose value is produced from a free-form prompt.
    pub fn ai(prompt: impl Into<String>) -> Self {
        FieldKind::Ai(AiOptions {
            prompt: prompt.into(),
        })
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Words(_) => FieldType::Words,
            FieldKind::Uuid(_) => FieldType::Uuid,
            FieldKind::Number(_) => FieldType::Number,
            FieldKind::Float(_) => FieldType::Float,
            FieldKind::Boolean(_) => FieldType::Boolean,
            FieldKind::Ai(_) => FieldType::Ai,
            FieldKind::Custom(_) => FieldType::Custom,
            FieldKind::Date(_) => FieldType::Date,
            FieldKind::Name(_) => FieldType::Name,
            FieldKind::FirstName(_) => FieldType::FirstName,
            FieldKind::LastName(_) => FieldType::LastName,
            FieldKind::Email => FieldType::Email,
            FieldKind::Address(_) => FieldType::Address,
            FieldKind::City => FieldType::City,
            FieldKind::Country => FieldType::Country,
            FieldKind::PhoneNumber(_) => FieldType::PhoneNumber,
            FieldKind::ZipCode(_) => FieldType::ZipCode,
            FieldKind::Sex => FieldType::Sex,
            FieldKind::Gender => FieldType::Gender,
            FieldKind::Avatar => FieldType::Avatar,
            FieldKind::JobTitle => FieldType::JobTitle,
            FieldKind::RandomString(_) => FieldType::RandomString,
            FieldKind::AccountName => FieldType::AccountName,
            FieldKind::Iban(_) => FieldType::Iban,
            FieldKind::CurrencyName => FieldType::CurrencyName,
            FieldKind::CreditCardNumber(_) => FieldType::CreditCardNumber,
            FieldKind::AccountNumber(_) => FieldType::AccountNumber,
            FieldKind::Password => FieldType::Password,
            FieldKind::DomainName => FieldType::DomainName,
            FieldKind::Color => FieldType::Color,
            FieldKind::Emoji => FieldType::Emoji,
            FieldKind::Ipv4 => FieldType::Ipv4,
            FieldKind::MacAddress => FieldType::MacAddress,
            FieldKind::Url => FieldType::Url,
            FieldKind::Product => FieldType::Product,
            FieldKind::Department => FieldType::Department,
            FieldKind::ProductName => FieldType::ProductName,
            FieldKind::Datetime(_) => FieldType::Datetime,
            FieldKind::Month(_) => FieldType::Month,
            FieldKind::Weekday(_) => FieldType::Weekday,
            FieldKind::TimeZone => FieldType::TimeZone,
            FieldKind::Lorem(_) => FieldType::Lorem,
            FieldKind::RegExp(_) => FieldType::RegExp,
            FieldKind::MongoObjectId => FieldType::MongoObjectId,
            FieldKind::Null(_) => FieldType::Null,
            FieldKind::Derived(_) => FieldType::Derived,
            FieldKind::Template(_) => FieldType::Template,
            FieldKind::ApiResponse(_) => FieldType::ApiResponse,
            FieldKind::DbResponse(_) => FieldType::DbResponse,
            FieldKind::Mapped(_) => FieldType::Mapped,
            FieldKind::Nested(_) => FieldType::Nested,
        }
    }

    /// Options bag as sent on the wire. Empty bags are omitted.
    pub fn options_value(&self) -> serde_json::Result<Option<Value>> {
        let value = match self {
            FieldKind::Words(options) => serde_json::to_value(options)?,
            FieldKind::Uuid(options) => serde_json::to_value(options)?,
            FieldKind::Number(options) => serde_json::to_value(options)?,
            FieldKind::Float(options) => serde_json::to_value(options)?,
            FieldKind::Boolean(options) => serde_json::to_value(options)?,
            FieldKind::Ai(options) => serde_json::to_value(options)?,
            FieldKind::Custom(options) => serde_json::to_value(options)?,
            FieldKind::Date(options)
            | FieldKind::PhoneNumber(options)
            | FieldKind::ZipCode(options) => serde_json::to_value(options)?,
            FieldKind::Name(options)
            | FieldKind::FirstName(options)
            | FieldKind::LastName(options) => serde_json::to_value(options)?,
            FieldKind::Address(options) => serde_json::to_value(options)?,
            FieldKind::RandomString(options) => serde_json::to_value(options)?,
            FieldKind::Iban(options) => serde_json::to_value(options)?,
            FieldKind::CreditCardNumber(options) => serde_json::to_value(options)?,
            FieldKind::AccountNumber(options) => serde_json::to_value(options)?,
            FieldKind::Datetime(options) => serde_json::to_value(options)?,
            FieldKind::Month(options) | FieldKind::Weekday(options) => {
                serde_json::to_value(options)?
            }
            FieldKind::Lorem(options) => serde_json::to_value(options)?,
            FieldKind::RegExp(options) => serde_json::to_value(options)?,
            FieldKind::Null(options) => serde_json::to_value(options)?,
            FieldKind::Derived(options) => serde_json::to_value(options)?,
            FieldKind::Template(options) => serde_json::to_value(options)?,
            FieldKind::ApiResponse(options) => serde_json::to_value(options)?,
            FieldKind::DbResponse(options) => serde_json::to_value(options)?,
            FieldKind::Mapped(options) => serde_json::to_value(options)?,
            FieldKind::Nested(options) => serde_json::to_value(options)?,
            FieldKind::Email
            | FieldKind::City
            | FieldKind::Country
            | FieldKind::Sex
            | FieldKind::Gender
            | FieldKind::Avatar
            | FieldKind::JobTitle
            | FieldKind::AccountName
            | FieldKind::CurrencyName
            | FieldKind::Password
            | FieldKind::DomainName
            | FieldKind::Color
            | FieldKind::Emoji
            | FieldKind::Ipv4
            | FieldKind::MacAddress
            | FieldKind::Url
            | FieldKind::Product
            | FieldKind::Department
            | FieldKind::ProductName
            | FieldKind::TimeZone
            | FieldKind::MongoObjectId => return Ok(None),
        };

        Ok(match value {
            Value::Object(map) if map.is_empty() => None,
            other => Some(other),
        })
    }
}

fn decode<T: DeserializeOwned>(
    field_type: FieldType,
    options: Option<Map<String, Value>>,
) -> Result<T> {
    let value = Value::Object(options.unwrap_or_default());
    serde_json::from_value(value).map_err(|err| FieldError::InvalidOptions {
        field_type: field_type.as_str(),
        message: err.to_string(),
    })
}

fn unit(
    field_type: FieldType,
    options: Option<Map<String, Value>>,
    kind: FieldKind,
) -> Result<FieldKind> {
    decode::<NoOptions>(field_type, options)?;
    Ok(kind)
}

/// One named generator within a template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    options: Option<Value>,
}

impl TryFrom<RawField> for Field {
    type Error = FieldError;

    fn try_from(raw: RawField) -> Result<Self> {
        let kind = FieldKind::from_parts(&raw.field_type, raw.options)?;
        Ok(Field {
            name: raw.name,
            kind,
        })
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let options = self
            .kind
            .options_value()
            .map_err(serde::ser::Error::custom)?;
        let len = if options.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("Field", len)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", self.kind.field_type().as_str())?;
        if let Some(options) = options {
            state.serialize_field("options", &options)?;
        }
        state.end()
    }
}
