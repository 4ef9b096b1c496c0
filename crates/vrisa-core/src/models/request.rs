//! Account registration and institution integration requests

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone regex"));

/// Role an applicant asks for when registering an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Operates a single monitoring station
    StationAdmin,
    /// Administers an institution and its stations
    InstitutionAdmin,
    /// Reads station data for research
    Researcher,
    /// Environmental authority with read access
    EnvironmentalAuthority,
    /// General public account
    Citizen,
}

impl Role {
    /// Roles tied to an institution must name one when registering
    pub fn requires_institution(&self) -> bool {
        matches!(
            self,
            Self::StationAdmin | Self::InstitutionAdmin | Self::Researcher
        )
    }

    /// Citizen accounts are activated without admin review
    pub fn needs_review(&self) -> bool {
        !matches!(self, Self::Citizen)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StationAdmin => "station_admin",
            Self::InstitutionAdmin => "institution_admin",
            Self::Researcher => "researcher",
            Self::EnvironmentalAuthority => "environmental_authority",
            Self::Citizen => "citizen",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "station_admin" => Ok(Self::StationAdmin),
            "institution_admin" => Ok(Self::InstitutionAdmin),
            "researcher" => Ok(Self::Researcher),
            "environmental_authority" => Ok(Self::EnvironmentalAuthority),
            "citizen" => Ok(Self::Citizen),
            "" => Err(Error::validation("role is required")),
            other => Err(Error::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Admin decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Approve the request
    Accept,
    /// Turn the request down
    Reject,
}

/// A pending account registration awaiting admin review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Given name(s)
    pub first_name: String,

    /// Paternal surname
    pub first_last_name: String,

    /// Maternal surname, if given
    pub second_last_name: Option<String>,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// Role the applicant asks for
    pub role: Role,

    /// Institution the applicant belongs to, when the role needs one
    pub institution: Option<String>,
}

impl RegistrationRequest {
    /// Applicant full name as shown in the review queue
    pub fn full_name(&self) -> String {
        match &self.second_last_name {
            Some(second) => format!("{} {} {}", self.first_name, self.first_last_name, second),
            None => format!("{} {}", self.first_name, self.first_last_name),
        }
    }
}

/// Raw account registration form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationDraft {
    /// Given name(s)
    #[serde(default)]
    pub first_name: String,

    /// Paternal surname
    #[serde(default)]
    pub first_last_name: String,

    /// Maternal surname (optional)
    #[serde(default)]
    pub second_last_name: Option<String>,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Contact phone
    #[serde(default)]
    pub phone: String,

    /// Requested role code
    #[serde(default)]
    pub role: String,

    /// Institution id, when the role needs one
    #[serde(default)]
    pub institution: Option<String>,
}

impl RegistrationDraft {
    /// Validate the submission and build the request it describes
    pub fn validate(self) -> Result<RegistrationRequest> {
        if self.first_name.trim().is_empty() {
            return Err(Error::validation("first name is required"));
        }
        if self.first_last_name.trim().is_empty() {
            return Err(Error::validation("first last name is required"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(Error::validation("email is required"));
        }
        if !EMAIL_RE.is_match(email) {
            return Err(Error::validation("email is not valid"));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(Error::validation("phone is required"));
        }
        if !PHONE_RE.is_match(phone) {
            return Err(Error::validation("phone must be 10 digits"));
        }

        let role: Role = self.role.trim().parse()?;

        let institution = self
            .institution
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if role.requires_institution() && institution.is_none() {
            return Err(Error::validation("institution is required for this role"));
        }

        Ok(RegistrationRequest {
            first_name: self.first_name.trim().to_string(),
            first_last_name: self.first_last_name.trim().to_string(),
            second_last_name: self
                .second_last_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            email: email.to_string(),
            phone: phone.to_string(),
            role,
            institution,
        })
    }
}

/// A pending institution integration awaiting admin review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationRequest {
    /// Institution name
    pub institution: String,

    /// Logo asset reference
    pub logo: String,

    /// Primary brand color
    pub primary_color: String,

    /// Secondary brand color
    pub secondary_color: String,

    /// Physical address
    pub address: String,
}

/// Raw institution integration form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationDraft {
    /// Institution name
    #[serde(default)]
    pub institution: String,

    /// Logo asset reference
    #[serde(default)]
    pub logo: String,

    /// Primary brand color
    #[serde(default)]
    pub primary_color: String,

    /// Secondary brand color
    #[serde(default)]
    pub secondary_color: String,

    /// Physical address
    #[serde(default)]
    pub address: String,
}

impl IntegrationDraft {
    /// Validate the submission and build the request it describes
    ///
    /// The color set arrives pre-filled from the form's pickers and is
    /// taken as-is.
    pub fn validate(self) -> Result<IntegrationRequest> {
        if self.institution.trim().is_empty() {
            return Err(Error::validation("institution name is required"));
        }
        if self.logo.trim().is_empty() {
            return Err(Error::validation("logo is required"));
        }
        if self.address.trim().is_empty() {
            return Err(Error::validation("address is required"));
        }

        Ok(IntegrationRequest {
            institution: self.institution.trim().to_string(),
            logo: self.logo.trim().to_string(),
            primary_color: self.primary_color,
            secondary_color: self.secondary_color,
            address: self.address.trim().to_string(),
        })
    }
}
