//! Domain records: users, cases, case updates, admins and channel config.
//!
//! Wire names are camelCase so local documents and remote rows share one
//! shape. Every timestamp is an ISO-8601 UTC string.

use crate::error::{Error, Result};
use crate::ids::generate_id;
use crate::lenient;
use crate::record::Record;
use crate::validate::{is_valid_email, is_valid_phone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// `createdBy` value for updates written by the system itself.
pub const SYSTEM_AUTHOR: &str = "system";

/// Message attached to every freshly submitted case.
pub const SUBMITTED_MESSAGE: &str = "Your case has been submitted successfully and is under review.";

/// Channel shown when no config record exists yet.
pub const DEFAULT_CHANNEL_URL: &str = "https://www.youtube.com/@HonestCustomerExperienceIndia";

// ---- users -------------------------------------------------------------------

/// Someone who submits cases.
///
/// Emails are unique, compared case-sensitively. The store does not enforce
/// this; check with [`Storage::user_by_email`](crate::Storage::user_by_email)
/// before creating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Record id.
    pub id: String,
    /// Login and contact address.
    pub email: String,
    /// Password hash, opaque here.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Contact number as entered.
    pub phone: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New user with a fresh id, created now. No checks; see
    /// [`User::register`] for signup input.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            email: email.into(),
            password: password_hash.into(),
            name: name.into(),
            phone: phone.into(),
            created_at: Utc::now(),
        }
    }

    /// Validate signup input and build a new user.
    ///
    /// Every field must be non-blank, `email` must look like an address and
    /// `phone` like a phone number. The plain-text password is checked with
    /// [`check_password`](crate::validate::check_password) before hashing, so
    /// only the hash arrives here.
    pub fn register(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self> {
        let user = Self::new(email, password_hash, name, phone);
        let required = [
            ("email", &user.email),
            ("password", &user.password),
            ("name", &user.name),
            ("phone", &user.phone),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(Error::Validation(format!("{field} is required")));
        }
        if !is_valid_email(&user.email) {
            return Err(Error::Validation(format!("invalid email format: {:?}", user.email)));
        }
        if !is_valid_phone(&user.phone) {
            return Err(Error::Validation(format!("invalid phone number: {:?}", user.phone)));
        }
        Ok(user)
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial update for a [`User`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New contact number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// ---- cases -------------------------------------------------------------------

/// Where a case is in the review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Just filed, nobody has looked at it.
    Submitted,
    /// An admin picked it up.
    UnderReview,
    /// Evidence checked out.
    Verified,
    /// Turned down; see `rejection_reason`.
    Rejected,
    /// Slotted for an episode.
    ScheduledForPodcast,
    /// Episode is out.
    Published,
}

impl CaseStatus {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Submitted => "submitted",
            CaseStatus::UnderReview => "under_review",
            CaseStatus::Verified => "verified",
            CaseStatus::Rejected => "rejected",
            CaseStatus::ScheduledForPodcast => "scheduled_for_podcast",
            CaseStatus::Published => "published",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the customer lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossType {
    /// Money paid or withheld.
    Money,
    /// Hours spent chasing the issue.
    Time,
    /// A missed opportunity.
    Opportunity,
    /// A missed meeting or appointment.
    Meeting,
    /// Anything else.
    Other,
}

impl LossType {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            LossType::Money => "money",
            LossType::Time => "time",
            LossType::Opportunity => "opportunity",
            LossType::Meeting => "meeting",
            LossType::Other => "other",
        }
    }
}

impl FromStr for LossType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "money" => Ok(LossType::Money),
            "time" => Ok(LossType::Time),
            "opportunity" => Ok(LossType::Opportunity),
            "meeting" => Ok(LossType::Meeting),
            "other" => Ok(LossType::Other),
            _ => Err(format!("unknown loss type {s:?}")),
        }
    }
}

/// A dispute report against a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Record id.
    pub id: String,
    /// Owner. Not enforced: deleting the user orphans the case.
    pub user_id: String,
    /// Workflow position.
    pub status: CaseStatus,

    /// Business the complaint is against.
    pub company_name: String,
    /// Business sector, e.g. "E-commerce", "Banking".
    pub domain: String,
    /// As entered by the customer.
    pub incident_date: String,
    /// What happened, in the customer's words.
    pub description: String,
    /// Kinds of loss claimed. A missing or null column reads as empty.
    #[serde(default, deserialize_with = "lenient::de_loss_types")]
    pub loss_types: Vec<LossType>,
    /// Amount lost, when money was involved.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::de_opt_number"
    )]
    pub monetary_loss: Option<f64>,

    /// Paths or URLs, in upload order.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::de_opt_string_list"
    )]
    pub evidence_files: Option<Vec<String>>,

    /// Who to reach about the case.
    pub contact_name: String,
    /// Contact address.
    pub contact_email: String,
    /// Contact number.
    pub contact_phone: String,

    /// Admin id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    /// When it was verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    /// Set when rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    /// Episode covering the case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podcast_video_url: Option<String>,
    /// When the episode went out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last change of any kind.
    pub updated_at: DateTime<Utc>,
}

impl Record for Case {
    fn id(&self) -> &str {
        &self.id
    }
}

/// What a customer fills in to submit a case.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetails {
    /// See [`Case::company_name`].
    pub company_name: String,
    /// See [`Case::domain`].
    pub domain: String,
    /// See [`Case::incident_date`].
    pub incident_date: String,
    /// See [`Case::description`].
    pub description: String,
    /// At least one; duplicates are dropped.
    pub loss_types: Vec<LossType>,
    /// Finite and non-negative when present.
    #[serde(default)]
    pub monetary_loss: Option<f64>,
    /// See [`Case::contact_name`].
    pub contact_name: String,
    /// See [`Case::contact_email`].
    pub contact_email: String,
    /// See [`Case::contact_phone`].
    pub contact_phone: String,
}

impl Case {
    /// Validate `details` and build a `submitted` case owned by `user_id`.
    pub fn submit(user_id: impl Into<String>, details: CaseDetails) -> Result<Self> {
        let required = [
            ("companyName", &details.company_name),
            ("domain", &details.domain),
            ("incidentDate", &details.incident_date),
            ("description", &details.description),
            ("contactName", &details.contact_name),
            ("contactEmail", &details.contact_email),
            ("contactPhone", &details.contact_phone),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(Error::Validation(format!("{field} is required")));
        }
        if details.loss_types.is_empty() {
            return Err(Error::Validation("at least one loss type must be selected".into()));
        }
        if let Some(loss) = details.monetary_loss {
            if !loss.is_finite() || loss < 0.0 {
                return Err(Error::Validation(format!("monetaryLoss must be a non-negative number, got {loss}")));
            }
        }

        let mut loss_types = details.loss_types;
        let mut seen = Vec::with_capacity(loss_types.len());
        loss_types.retain(|t| {
            let fresh = !seen.contains(t);
            seen.push(*t);
            fresh
        });

        let now = Utc::now();
        Ok(Self {
            id: generate_id(),
            user_id: user_id.into(),
            status: CaseStatus::Submitted,
            company_name: details.company_name,
            domain: details.domain,
            incident_date: details.incident_date,
            description: details.description,
            loss_types,
            monetary_loss: details.monetary_loss,
            evidence_files: None,
            contact_name: details.contact_name,
            contact_email: details.contact_email,
            contact_phone: details.contact_phone,
            verified_by: None,
            verified_at: None,
            rejection_reason: None,
            podcast_video_url: None,
            published_at: None,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update for a [`Case`]. Set `updated_at` alongside any change;
/// [`CasePatch::status`] does that for you.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePatch {
    /// New workflow position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    /// Corrected description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Corrected amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monetary_loss: Option<f64>,
    /// Replaces the whole list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_files: Option<Vec<String>>,
    /// Verifying admin id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    /// Verification time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    /// Why it was turned down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Episode link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_video_url: Option<String>,
    /// Publication time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Change time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CasePatch {
    /// Move to `status`, stamping `updatedAt` with now.
    pub fn status(status: CaseStatus) -> Self {
        Self {
            status: Some(status),
            updated_at: Some(Utc::now()),
            ..Self::default()
        }
    }
}

// ---- case updates ------------------------------------------------------------

/// A timeline entry on a case. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpdate {
    /// Record id.
    pub id: String,
    /// Case this entry belongs to.
    pub case_id: String,
    /// Text shown on the timeline.
    pub message: String,
    /// When it was written.
    pub created_at: DateTime<Utc>,
    /// User or admin id, or [`SYSTEM_AUTHOR`].
    pub created_by: String,
}

impl CaseUpdate {
    /// New entry on `case_id` by `created_by`, stamped now.
    pub fn new(case_id: impl Into<String>, message: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            case_id: case_id.into(),
            message: message.into(),
            created_at: Utc::now(),
            created_by: created_by.into(),
        }
    }

    /// Entry written by the system.
    pub fn system(case_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(case_id, message, SYSTEM_AUTHOR)
    }

    /// `true` when no person authored this entry.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.created_by == SYSTEM_AUTHOR
    }
}

impl Record for CaseUpdate {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---- admins ------------------------------------------------------------------

/// Back-office permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Reviews cases.
    Admin,
    /// Also manages other admins.
    SuperAdmin,
}

/// Back-office account that reviews cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    /// Record id.
    pub id: String,
    /// Login address.
    pub email: String,
    /// Password hash, opaque here.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Permission level.
    pub role: AdminRole,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl Record for Admin {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial update for an [`Admin`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPatch {
    /// New address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New permission level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AdminRole>,
}

// ---- channel config ----------------------------------------------------------

/// Video channel shown on the landing page. Only the first record counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    /// Record id.
    pub id: String,
    /// Channel landing page.
    pub channel_url: String,
    /// Empty until an admin picks one.
    pub featured_video_id: String,
    /// Last admin edit.
    pub last_updated: DateTime<Utc>,
}

impl ChannelConfig {
    /// Hardcoded default used while the collection is empty.
    pub fn fallback() -> Self {
        Self {
            id: "default".to_string(),
            channel_url: DEFAULT_CHANNEL_URL.to_string(),
            featured_video_id: String::new(),
            last_updated: Utc::now(),
        }
    }
}

impl Record for ChannelConfig {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial update for the [`ChannelConfig`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfigPatch {
    /// New channel link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<String>,
    /// New featured video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_video_id: Option<String>,
    /// Edit time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}
