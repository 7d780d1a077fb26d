// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Represents a film production.
///
/// A production has a canonical numeric ID (`production_id`) assigned by the
/// database as well as a human-readable name. All schedule data is scoped to
/// one production.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Production {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the production has not been persisted yet.
    production_id: Option<i64>,
    /// The production's display name.
    name: String,
    /// First day of principal photography, when known.
    ///
    /// The week resolver anchors production weeks to this date; without it,
    /// ISO calendar weeks are used instead.
    shooting_start_date: Option<Date>,
}

// Two Productions are equal if they have the same name, regardless of their IDs
impl PartialEq for Production {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Production {}

impl std::hash::Hash for Production {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Production {
    /// Creates a new `Production` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `name` - The production's display name
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            production_id: None,
            name: name.to_string(),
            shooting_start_date: None,
        }
    }

    /// Creates a `Production` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `production_id` - The canonical numeric identifier
    /// * `name` - The production's display name
    /// * `shooting_start_date` - First day of principal photography, if set
    #[must_use]
    pub const fn with_id(
        production_id: i64,
        name: String,
        shooting_start_date: Option<Date>,
    ) -> Self {
        Self {
            production_id: Some(production_id),
            name,
            shooting_start_date,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn production_id(&self) -> Option<i64> {
        self.production_id
    }

    /// Returns the production's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first day of principal photography, if set.
    #[must_use]
    pub const fn shooting_start_date(&self) -> Option<Date> {
        self.shooting_start_date
    }

    /// Sets the first day of principal photography.
    pub const fn set_shooting_start_date(&mut self, date: Option<Date>) {
        self.shooting_start_date = date;
    }
}

/// Represents a department on a production.
///
/// Departments are identified by a lowercase name; the special name
/// `production` designates the production office, which may act on any
/// department's records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the department has not been persisted yet.
    department_id: Option<i64>,
    /// The department name, normalized to lowercase.
    name: String,
}

// Two Departments are equal if they have the same name, regardless of their IDs
impl PartialEq for Department {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Department {}

impl std::hash::Hash for Department {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Department {
    /// The canonical name of the production office department.
    pub const PRODUCTION: &'static str = "production";

    /// Creates a new `Department` without a persisted ID.
    ///
    /// Names are normalized to lowercase to ensure case-insensitive
    /// uniqueness.
    ///
    /// # Arguments
    ///
    /// * `name` - The department name (will be normalized to lowercase)
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            department_id: None,
            name: name.to_lowercase(),
        }
    }

    /// Creates the production office department.
    #[must_use]
    pub fn production() -> Self {
        Self::new(Self::PRODUCTION)
    }

    /// Creates a `Department` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `department_id` - The canonical numeric identifier
    /// * `name` - The department name
    #[must_use]
    pub fn with_id(department_id: i64, name: &str) -> Self {
        Self {
            department_id: Some(department_id),
            name: name.to_lowercase(),
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn department_id(&self) -> Option<i64> {
        self.department_id
    }

    /// Returns the department name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this is the production office department.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.name == Self::PRODUCTION
    }
}

/// Represents the sibling-group key shared by the legs of one round trip.
///
/// Siblings are discovered through this explicit key; there is no id-suffix
/// convention to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId {
    /// The group key value.
    value: String,
}

impl GroupId {
    /// Creates a new `GroupId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The group key value
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or whitespace-only.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidGroupId(String::from(
                "Group id cannot be empty",
            )));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the group key value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The kind of a logistics request leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// A pickup leg (collecting equipment from a supplier).
    Pickup,
    /// A dropoff/return leg (returning equipment to a supplier).
    Dropoff,
    /// A pickup of set material.
    PickupSet,
    /// A dropoff of set material.
    DropoffSet,
    /// A same-day round trip.
    RoundTrip,
    /// The usage day itself (equipment on set).
    Usage,
}

impl RequestKind {
    /// Converts this request kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
            Self::PickupSet => "pickup_set",
            Self::DropoffSet => "dropoff_set",
            Self::RoundTrip => "roundtrip",
            Self::Usage => "usage",
        }
    }

    /// Returns whether this leg collects material (pickup-like).
    ///
    /// Pickup-like legs that land on a Sunday are shifted backward to the
    /// preceding Saturday.
    #[must_use]
    pub const fn is_pickup_like(&self) -> bool {
        matches!(self, Self::Pickup | Self::PickupSet)
    }

    /// Returns whether this leg returns material (dropoff-like).
    ///
    /// Dropoff-like legs that land on a Sunday are shifted forward to the
    /// following Monday.
    #[must_use]
    pub const fn is_dropoff_like(&self) -> bool {
        matches!(self, Self::Dropoff | Self::DropoffSet)
    }
}

impl FromStr for RequestKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(Self::Pickup),
            "dropoff" => Ok(Self::Dropoff),
            "pickup_set" => Ok(Self::PickupSet),
            "dropoff_set" => Ok(Self::DropoffSet),
            "roundtrip" => Ok(Self::RoundTrip),
            "usage" => Ok(Self::Usage),
            _ => Err(DomainError::InvalidRequestKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The phase of a schedule link relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkPhase {
    /// Rigging days before the reference range.
    Prelight,
    /// The shooting days themselves.
    Shooting,
    /// Strike days after the reference range.
    Demontage,
}

impl LinkPhase {
    /// Converts this link phase to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prelight => "PRELIGHT",
            Self::Shooting => "SHOOTING",
            Self::Demontage => "DEMONTAGE",
        }
    }
}

impl FromStr for LinkPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRELIGHT" => Ok(Self::Prelight),
            "SHOOTING" => Ok(Self::Shooting),
            "DEMONTAGE" => Ok(Self::Demontage),
            _ => Err(DomainError::InvalidLinkPhase(s.to_string())),
        }
    }
}

impl std::fmt::Display for LinkPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The workflow status of a logistics request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RequestStatus {
    /// Initial state after submission.
    #[default]
    Pending,
    /// Confirmed by the production office.
    Confirmed,
}

impl RequestStatus {
    /// Converts this request status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            _ => Err(DomainError::InvalidRequestStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The approval status of a reinforcement staff entry.
///
/// The workflow is one-way: `Pending` entries may be approved, and approved
/// entries never revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValidationStatus {
    /// Awaiting approval by the production office.
    #[default]
    Pending,
    /// Approved by the production office.
    Approved,
}

impl ValidationStatus {
    /// Converts this validation status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// The only valid transition is `Pending` → `Approved`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Pending, Self::Approved))
    }

    /// Returns whether this entry has been approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl FromStr for ValidationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            _ => Err(DomainError::InvalidValidationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The reference a schedule entry is anchored to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkRef {
    /// Anchored to a shooting sequence (always a single day).
    Sequence(String),
    /// Anchored to a shooting location (possibly a multi-day range).
    Location(String),
}

impl LinkRef {
    /// Returns the linked sequence id, if this is a sequence reference.
    #[must_use]
    pub fn sequence_id(&self) -> Option<&str> {
        match self {
            Self::Sequence(id) => Some(id),
            Self::Location(_) => None,
        }
    }

    /// Returns the linked location id, if this is a location reference.
    #[must_use]
    pub fn location_id(&self) -> Option<&str> {
        match self {
            Self::Location(id) => Some(id),
            Self::Sequence(_) => None,
        }
    }

    /// Returns whether this reference points at a sequence.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }
}

/// How a schedule entry is anchored to its reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleLink {
    /// The linked sequence or location.
    pub reference: LinkRef,
    /// The phase relative to the reference range.
    pub phase: LinkPhase,
    /// Signed day distance from the phase's anchor date (range start for
    /// `Prelight`/`Shooting`, range end for `Demontage`).
    pub day_offset: i64,
    /// Number of days covered (at least 1).
    pub duration: u32,
}

impl ScheduleLink {
    /// Creates a new `ScheduleLink`.
    ///
    /// # Arguments
    ///
    /// * `reference` - The linked sequence or location
    /// * `phase` - The phase relative to the reference range
    /// * `day_offset` - Signed day distance from the phase's anchor date
    /// * `duration` - Number of days covered
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is zero.
    pub fn new(
        reference: LinkRef,
        phase: LinkPhase,
        day_offset: i64,
        duration: u32,
    ) -> Result<Self, DomainError> {
        if duration == 0 {
            return Err(DomainError::InvalidDuration { given: duration });
        }
        Ok(Self {
            reference,
            phase,
            day_offset,
            duration,
        })
    }
}

/// A single logistics request leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogisticsRequest {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the request has not been persisted yet.
    pub request_id: Option<i64>,
    /// Sibling-group key shared by the legs of one round trip, if any.
    pub group_id: Option<GroupId>,
    /// The kind of this leg.
    pub kind: RequestKind,
    /// The calendar day this leg occurs.
    pub date: Date,
    /// The owning department.
    pub department: Department,
    /// Free-text time indication (e.g. "08:30").
    pub time_note: Option<String>,
    /// Free-text pickup/delivery location.
    pub location: Option<String>,
    /// Free-text description of the material.
    pub description: Option<String>,
    /// Free-text vehicle type.
    pub vehicle_type: Option<String>,
    /// How this entry is anchored to a sequence or location, if linked.
    pub link: Option<ScheduleLink>,
    /// Whether the entry follows its reference automatically when the
    /// reference's date changes.
    ///
    /// True iff the entry is linked to a sequence. Location-linked entries
    /// do not auto-follow their reference; the asymmetry is inherited from
    /// the source system and preserved deliberately rather than fixed.
    pub auto_update_dates: bool,
    /// The workflow status of this request.
    pub status: RequestStatus,
}

impl LogisticsRequest {
    /// Creates a new unlinked request leg.
    ///
    /// # Arguments
    ///
    /// * `kind` - The kind of this leg
    /// * `date` - The calendar day this leg occurs
    /// * `department` - The owning department
    #[must_use]
    pub const fn new(kind: RequestKind, date: Date, department: Department) -> Self {
        Self {
            request_id: None,
            group_id: None,
            kind,
            date,
            department,
            time_note: None,
            location: None,
            description: None,
            vehicle_type: None,
            link: None,
            auto_update_dates: false,
            status: RequestStatus::Pending,
        }
    }

    /// Anchors this entry to a reference.
    ///
    /// Sets `auto_update_dates` iff the reference is a sequence (the
    /// inherited asymmetry: location links never auto-follow).
    #[must_use]
    pub fn with_link(mut self, link: ScheduleLink) -> Self {
        self.auto_update_dates = link.reference.is_sequence();
        self.link = Some(link);
        self
    }

    /// Clears every link field, detaching the entry from its reference.
    ///
    /// A detached entry keeps its current date and no longer follows its
    /// sequence or location.
    pub fn clear_link(&mut self) {
        self.link = None;
        self.auto_update_dates = false;
    }

    /// Returns whether this entry is anchored to a sequence or location.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.link.is_some()
    }
}

/// A single reinforcement staff entry (one person, one day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementDetail {
    /// Application-generated identifier, stable across date moves.
    pub staff_id: String,
    /// The person's name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// The role the person is hired for.
    pub role: Option<String>,
    /// How this entry is anchored to a sequence or location, if linked.
    pub link: Option<ScheduleLink>,
    /// The approval status of this entry.
    pub validation_status: ValidationStatus,
}

impl ReinforcementDetail {
    /// Creates a new staff entry.
    ///
    /// # Arguments
    ///
    /// * `staff_id` - Application-generated identifier
    /// * `name` - The person's name
    /// * `validation_status` - The initial approval status
    #[must_use]
    pub const fn new(staff_id: String, name: String, validation_status: ValidationStatus) -> Self {
        Self {
            staff_id,
            name,
            phone: None,
            email: None,
            role: None,
            link: None,
            validation_status,
        }
    }
}

/// The reinforcement record for one `(date, department)` pair.
///
/// There is exactly one record per date and department; individual people
/// are entries in `staff`. Legacy records that carried a flat name list are
/// normalized into `staff` once at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reinforcement {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the record has not been persisted yet.
    pub reinforcement_id: Option<i64>,
    /// The calendar day this record covers.
    pub date: Date,
    /// The owning department.
    pub department: Department,
    /// The ordered staff entries for this day.
    pub staff: Vec<ReinforcementDetail>,
}

impl Reinforcement {
    /// Creates a new empty reinforcement record.
    ///
    /// # Arguments
    ///
    /// * `date` - The calendar day this record covers
    /// * `department` - The owning department
    #[must_use]
    pub const fn new(date: Date, department: Department) -> Self {
        Self {
            reinforcement_id: None,
            date,
            department,
            staff: Vec::new(),
        }
    }

    /// Finds a staff entry by its identifier.
    #[must_use]
    pub fn find_staff(&self, staff_id: &str) -> Option<&ReinforcementDetail> {
        self.staff.iter().find(|d| d.staff_id == staff_id)
    }

    /// Returns whether this record has no staff entries left.
    ///
    /// Empty records are deleted rather than kept around.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }
}

/// A production day record from the read-only day table.
///
/// The day table is maintained by the assistant directors and consumed here
/// only to resolve location date ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionDay {
    /// The calendar day.
    pub date: Date,
    /// The location shot on this day, if any.
    pub location: Option<String>,
    /// A secondary linked location (company moves), if any.
    pub linked_location: Option<String>,
}

impl ProductionDay {
    /// Returns whether this day shoots at the given location.
    ///
    /// Both the primary and the linked location fields count.
    #[must_use]
    pub fn matches_location(&self, location_id: &str) -> bool {
        self.location.as_deref() == Some(location_id)
            || self.linked_location.as_deref() == Some(location_id)
    }
}

/// A shooting sequence record from the read-only sequence table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// The sequence identifier.
    pub sequence_id: String,
    /// The day the sequence shoots.
    pub date: Date,
    /// The set/decor name, if any.
    pub decor: Option<String>,
}

/// The acting context for a core operation.
///
/// The context is passed explicitly into every operation rather than read
/// from ambient UI state. It carries the acting department and whether the
/// actor holds production-office authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingContext {
    /// The department the actor is acting for.
    pub department: Department,
    /// Whether the actor may act on any department's records and approve
    /// reinforcement staff.
    pub can_act_any_department: bool,
}

impl ActingContext {
    /// Creates a production-office context.
    #[must_use]
    pub fn production() -> Self {
        Self {
            department: Department::production(),
            can_act_any_department: true,
        }
    }

    /// Creates a department context.
    ///
    /// # Arguments
    ///
    /// * `department` - The department the actor belongs to
    #[must_use]
    pub fn for_department(department: Department) -> Self {
        let can_act_any_department = department.is_production();
        Self {
            department,
            can_act_any_department,
        }
    }

    /// Returns the approval status a new staff entry starts in for this
    /// context.
    ///
    /// Production-office submissions are born approved; everything else
    /// starts pending.
    #[must_use]
    pub const fn initial_validation_status(&self) -> ValidationStatus {
        if self.can_act_any_department {
            ValidationStatus::Approved
        } else {
            ValidationStatus::Pending
        }
    }
}
