//! Input validation for user and address payloads.
//!
//! Raw tool arguments come in as request structs. `validate()` turns them into
//! the typed payloads the repositories accept, or a `DbError::Validation`
//! carrying a message that can be shown to the caller as-is.

use crate::db::{AddressChanges, DbError, DbResult, Gender, Id, NewAddress, NewUser, UserChanges};

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_STREET_LEN: usize = 255;
pub const MAX_CITY_LEN: usize = 100;
pub const MAX_POSTAL_CODE_LEN: usize = 20;
pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 150;

/// ISO 3166-1 alpha-2 country codes.
pub const COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

/// Raw arguments of the `add_user` tool.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i64,
    pub gender: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(self) -> DbResult<NewUser> {
        Ok(NewUser {
            first_name: validate_length("first_name", &self.first_name, MAX_NAME_LEN)?,
            last_name: validate_length("last_name", &self.last_name, MAX_NAME_LEN)?,
            email: validate_email(&self.email)?,
            age: validate_age(self.age)?,
            gender: self.gender.as_deref().map(parse_gender).transpose()?,
        })
    }
}

/// Raw arguments of the `update_user` tool.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub last_name: String,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

impl UpdateUserRequest {
    /// Returns the lookup key and the validated changes.
    pub fn validate(self) -> DbResult<(String, UserChanges)> {
        let changes = UserChanges {
            first_name: self
                .first_name
                .as_deref()
                .map(|v| validate_length("first_name", v, MAX_NAME_LEN))
                .transpose()?,
            email: self.email.as_deref().map(validate_email).transpose()?,
            age: self.age.map(validate_age).transpose()?,
            gender: self.gender.as_deref().map(parse_gender).transpose()?,
        };
        Ok((self.last_name, changes))
    }
}

/// Raw arguments of the `add_address` tool.
#[derive(Debug, Clone)]
pub struct CreateAddressRequest {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country_code: String,
    pub user_id: Id,
}

impl CreateAddressRequest {
    pub fn validate(self) -> DbResult<NewAddress> {
        Ok(NewAddress {
            street: validate_length("street", &self.street, MAX_STREET_LEN)?,
            city: validate_length("city", &self.city, MAX_CITY_LEN)?,
            postal_code: validate_length("postal_code", &self.postal_code, MAX_POSTAL_CODE_LEN)?,
            country_code: normalize_country_code(&self.country_code)?,
            user_id: self.user_id,
        })
    }
}

/// Raw arguments of the `update_address` tool.
#[derive(Debug, Clone, Default)]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
}

impl UpdateAddressRequest {
    pub fn validate(self) -> DbResult<AddressChanges> {
        Ok(AddressChanges {
            street: self
                .street
                .as_deref()
                .map(|v| validate_length("street", v, MAX_STREET_LEN))
                .transpose()?,
            city: self
                .city
                .as_deref()
                .map(|v| validate_length("city", v, MAX_CITY_LEN))
                .transpose()?,
            postal_code: self
                .postal_code
                .as_deref()
                .map(|v| validate_length("postal_code", v, MAX_POSTAL_CODE_LEN))
                .transpose()?,
            country_code: self
                .country_code
                .as_deref()
                .map(normalize_country_code)
                .transpose()?,
        })
    }
}

/// Parse a gender option, case-insensitive.
pub fn parse_gender(value: &str) -> DbResult<Gender> {
    value.parse::<Gender>().map_err(DbError::validation)
}

/// Check an ISO 3166-1 alpha-2 code and return it upper-cased.
pub fn normalize_country_code(value: &str) -> DbResult<String> {
    let code = value.trim().to_uppercase();
    if COUNTRY_CODES.binary_search(&code.as_str()).is_ok() {
        Ok(code)
    } else {
        Err(DbError::validation(format!(
            "Invalid country code '{}'. Must be ISO 3166-1 alpha-2 format (e.g., 'DE', 'US', 'FR').",
            value
        )))
    }
}

fn validate_length(field: &str, value: &str, max: usize) -> DbResult<String> {
    let len = value.chars().count();
    if len == 0 {
        return Err(DbError::validation(format!("{} must not be empty", field)));
    }
    if len > max {
        return Err(DbError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(value.to_string())
}

fn validate_age(age: i64) -> DbResult<i64> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(age)
    } else {
        Err(DbError::validation(format!(
            "age must be between {} and {}",
            MIN_AGE, MAX_AGE
        )))
    }
}

fn validate_email(value: &str) -> DbResult<String> {
    let invalid = || DbError::validation(format!("Invalid email address '{}'", value));

    if value.chars().count() > MAX_EMAIL_LEN || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    // Domain needs at least one dot with non-empty labels around it
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(value.to_string())
}
