//! Company field validation
//!
//! The three predicates (`validate_tax_id`, `validate_activity_code`,
//! `validate_non_empty`) are pure and total. The newtypes wrap them so that
//! a `TaxId` or `ActivityCode` in hand is always well-formed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::ValidationError;

/// Accepted tax id (CNPJ) layouts. Stored as received, never normalised.
static TAX_ID_RES: Lazy<[Regex; 6]> = Lazy::new(|| {
    [
        r"^\d{11}$",
        r"^\d{14}$",
        r"^\d{3}\.\d{3}\.\d{3}-\d{2}$",
        r"^\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}$",
        r"^\d{9}-\d{2}$",
        r"^\d{8}/\d{4}-\d{2}$",
    ]
    .map(|pattern| Regex::new(pattern).expect("invalid tax id regex"))
});

/// Activity code (CNAE): `NN[.]NN[-]N[-]NN`
static ACTIVITY_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}\.?\d{2}-?\d-?\d{2}$").expect("invalid activity code regex")
});

/// True iff `value` matches one of the six accepted tax id layouts.
///
/// ```
/// use companies_server::models::validate_tax_id;
///
/// assert!(validate_tax_id("12.345.678/0001-99"));
/// assert!(!validate_tax_id("1234"));
/// ```
pub fn validate_tax_id(value: &str) -> bool {
    TAX_ID_RES.iter().any(|re| re.is_match(value))
}

/// True iff `value` is a two-digit, two-digit, one-digit, two-digit activity
/// code with optional `.`, `-`, `-` separators.
pub fn validate_activity_code(value: &str) -> bool {
    ACTIVITY_CODE_RE.is_match(value)
}

/// True iff `value` has at least one character.
pub fn validate_non_empty(value: &str) -> bool {
    !value.is_empty()
}

/// Validated tax id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if !validate_tax_id(s) {
            return Err(ValidationError::InvalidFormat {
                field: "tax id",
                reason: "expected 11 or 14 digits, optionally formatted as NNN.NNN.NNN-NN or NN.NNN.NNN/NNNN-NN",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated activity code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCode(String);

impl ActivityCode {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if !validate_activity_code(s) {
            return Err(ValidationError::InvalidFormat {
                field: "activity code",
                reason: "expected NN.NN-N-NN (separators optional)",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registered (legal) name. Non-empty, fixed after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalName(String);

impl LegalName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if !validate_non_empty(s) {
            return Err(ValidationError::Empty { field: "legal name" });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trade name. Non-empty, may change through a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeName(String);

impl TradeName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if !validate_non_empty(s) {
            return Err(ValidationError::Empty { field: "trade name" });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body of `POST /company/`
///
/// Every field is optional at the wire level so that missing fields can be
/// reported together instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCompanyRequest {
    #[serde(default, alias = "taxId", alias = "cnpj")]
    pub tax_id: Option<String>,
    #[serde(default, alias = "legalName", alias = "nomerazao")]
    pub legal_name: Option<String>,
    #[serde(default, alias = "tradeName", alias = "nomefantasia")]
    pub trade_name: Option<String>,
    #[serde(default, alias = "activityCode", alias = "cnae")]
    pub activity_code: Option<String>,
}

/// Body of `PATCH /company/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanyRequest {
    #[serde(default, alias = "tradeName", alias = "nomefantasia")]
    pub trade_name: Option<String>,
    #[serde(default, alias = "activityCode", alias = "cnae")]
    pub activity_code: Option<String>,
}

/// A fully validated company, ready to insert
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub tax_id: TaxId,
    pub legal_name: LegalName,
    pub trade_name: TradeName,
    pub activity_code: ActivityCode,
}

impl NewCompany {
    /// Validate a create request.
    ///
    /// Order of checks: presence of all four fields (reported together),
    /// then tax id format, then activity code format, then non-empty names.
    /// An empty string counts as missing.
    pub fn from_request(req: &CreateCompanyRequest) -> Result<Self, ValidationError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(validate_non_empty);

        let missing: Vec<&'static str> = [
            ("tax_id", &req.tax_id),
            ("legal_name", &req.legal_name),
            ("trade_name", &req.trade_name),
            ("activity_code", &req.activity_code),
        ]
        .into_iter()
        .filter(|(_, value)| !present(*value))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::Missing { fields: missing });
        }

        let field = |v: &Option<String>| v.clone().unwrap_or_default();

        let tax_id = TaxId::new(&field(&req.tax_id))?;
        let activity_code = ActivityCode::new(&field(&req.activity_code))?;
        let legal_name = LegalName::new(&field(&req.legal_name))?;
        let trade_name = TradeName::new(&field(&req.trade_name))?;

        Ok(Self {
            tax_id,
            legal_name,
            trade_name,
            activity_code,
        })
    }
}

/// A validated partial update. At least one field is set.
#[derive(Debug, Clone)]
pub struct CompanyPatch {
    pub trade_name: Option<TradeName>,
    pub activity_code: Option<ActivityCode>,
}

impl CompanyPatch {
    /// Validate an update request.
    ///
    /// Fails with `MissingAnyOf` when neither field is supplied. A supplied
    /// activity code is checked before a supplied trade name.
    pub fn from_request(req: &UpdateCompanyRequest) -> Result<Self, ValidationError> {
        if req.trade_name.is_none() && req.activity_code.is_none() {
            return Err(ValidationError::MissingAnyOf {
                fields: vec!["trade_name", "activity_code"],
            });
        }

        let activity_code = req
            .activity_code
            .as_deref()
            .map(ActivityCode::new)
            .transpose()?;
        let trade_name = req.trade_name.as_deref().map(TradeName::new).transpose()?;

        Ok(Self {
            trade_name,
            activity_code,
        })
    }
}
