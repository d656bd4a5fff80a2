//! List query types: paging window and sort order
//!
//! Sort columns and directions are closed enums so that the only text ever
//! spliced into an `ORDER BY` clause comes from the static strings below.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum page size
pub const MAX_LIMIT: u32 = 100;

/// Page size when the caller doesn't supply one
pub const DEFAULT_LIMIT: u32 = 10;

/// Value of `limit` requesting every remaining row
const UNBOUNDED: &str = "all";

/// Sortable company fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    TaxId,
    LegalName,
    TradeName,
    ActivityCode,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        Self::Id,
        Self::TaxId,
        Self::LegalName,
        Self::TradeName,
        Self::ActivityCode,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Parse a field name. Accepts snake_case, camelCase and the legacy
    /// Portuguese column names.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let field = match s {
            "id" | "uuid" => Self::Id,
            "tax_id" | "taxId" | "cnpj" => Self::TaxId,
            "legal_name" | "legalName" | "nomerazao" => Self::LegalName,
            "trade_name" | "tradeName" | "nomefantasia" => Self::TradeName,
            "activity_code" | "activityCode" | "cnae" => Self::ActivityCode,
            "created_at" | "createdAt" => Self::CreatedAt,
            "updated_at" | "updatedAt" => Self::UpdatedAt,
            other => {
                return Err(ValidationError::InvalidSort {
                    value: other.to_owned(),
                })
            }
        };
        Ok(field)
    }

    /// Canonical field name, as echoed back to clients.
    pub fn as_str(&self) -> &'static str {
        self.column()
    }

    /// Column reference for `ORDER BY`.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::TaxId => "tax_id",
            Self::LegalName => "legal_name",
            Self::TradeName => "trade_name",
            Self::ActivityCode => "activity_code",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Parse `asc`/`desc`, case-insensitive.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ValidationError::InvalidDirection { value: s.to_owned() })
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Validated list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// Rows to skip
    pub offset: u32,
    /// Maximum rows to return, `None` = unbounded
    pub limit: Option<u32>,
    pub sort: SortField,
    pub dir: SortDir,
}

impl ListQuery {
    /// Create a query, clamping `limit` to `1..=MAX_LIMIT`.
    pub fn new(offset: u32, limit: Option<u32>, sort: SortField, dir: SortDir) -> Self {
        Self {
            offset,
            limit: limit.map(|l| l.clamp(1, MAX_LIMIT)),
            sort,
            dir,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(0, Some(DEFAULT_LIMIT), SortField::default(), SortDir::default())
    }
}

/// Raw query string parameters for `GET /companies/`
///
/// Kept as text so malformed values produce a `ValidationError` body
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub start: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl TryFrom<ListParams> for ListQuery {
    type Error = ValidationError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let offset = match params.start.as_deref() {
            None | Some("") => 0,
            Some(s) => parse_count("start", s)?,
        };

        let limit = match params.limit.as_deref() {
            None | Some("") => Some(DEFAULT_LIMIT),
            Some(s) if s.eq_ignore_ascii_case(UNBOUNDED) => None,
            Some(s) => Some(parse_count("limit", s)?),
        };

        let sort = params
            .sort
            .as_deref()
            .map(SortField::parse)
            .transpose()?
            .unwrap_or_default();

        let dir = params
            .dir
            .as_deref()
            .map(SortDir::parse)
            .transpose()?
            .unwrap_or_default();

        Ok(Self::new(offset, limit, sort, dir))
    }
}

fn parse_count(field: &'static str, s: &str) -> Result<u32, ValidationError> {
    s.parse::<u32>().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: s.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: Option<&str>, limit: Option<&str>, sort: Option<&str>, dir: Option<&str>) -> ListParams {
        ListParams {
            start: start.map(str::to_owned),
            limit: limit.map(str::to_owned),
            sort: sort.map(str::to_owned),
            dir: dir.map(str::to_owned),
        }
    }

    #[test]
    fn defaults() {
        let q = ListQuery::try_from(ListParams::default()).unwrap();
        assert_eq!(q, ListQuery::default());
        assert_eq!(q.offset, 0);
        assert_eq!(q.limit, Some(10));
        assert_eq!(q.sort, SortField::Id);
        assert_eq!(q.dir, SortDir::Asc);
    }

    #[test]
    fn clamps_limit() {
        let q = ListQuery::try_from(params(None, Some("0"), None, None)).unwrap();
        assert_eq!(q.limit, Some(1));

        let q = ListQuery::try_from(params(None, Some("999"), None, None)).unwrap();
        assert_eq!(q.limit, Some(MAX_LIMIT));
    }

    #[test]
    fn unbounded_limit() {
        let q = ListQuery::try_from(params(None, Some("ALL"), None, None)).unwrap();
        assert_eq!(q.limit, None);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = ListQuery::try_from(params(Some("-1"), None, None, None)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "start", .. }));

        let err = ListQuery::try_from(params(None, Some("ten"), None, None)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "limit", .. }));
    }

    #[test]
    fn sort_field_spellings() {
        assert_eq!(SortField::parse("legalName").unwrap(), SortField::LegalName);
        assert_eq!(SortField::parse("legal_name").unwrap(), SortField::LegalName);
        assert_eq!(SortField::parse("nomerazao").unwrap(), SortField::LegalName);
        assert_eq!(SortField::parse("uuid").unwrap(), SortField::Id);
        assert!(matches!(
            SortField::parse("id; DROP TABLE companies"),
            Err(ValidationError::InvalidSort { .. })
        ));
    }

    #[test]
    fn every_field_round_trips_through_its_name() {
        for field in SortField::ALL {
            assert_eq!(SortField::parse(field.as_str()).unwrap(), field);
        }
    }

    #[test]
    fn direction_is_case_insensitive() {
        assert_eq!(SortDir::parse("DeSc").unwrap(), SortDir::Desc);
        assert_eq!(SortDir::parse("asc").unwrap().as_sql(), "ASC");
        assert!(matches!(
            SortDir::parse("up"),
            Err(ValidationError::InvalidDirection { .. })
        ));
    }
}
