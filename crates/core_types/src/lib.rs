//! Core types for the BeautyBook studio front end.
//!
//! This crate defines the rows persisted by the hosted backend, as they
//! appear on the wire, plus the small pure computations the views run over
//! them (dashboard aggregation, phone masking, display labels).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Name shown when the studio has not configured one.
pub const DEFAULT_STUDIO_NAME: &str = "BeautyBook";

/// User role as resolved by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Studio owner / manager
    Admin,
    /// Staff member offering services
    Professional,
    /// End customer booking services
    Client,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Professional, Role::Client];

    /// Wire representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Professional => "professional",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "professional" => Ok(Role::Professional),
            "client" => Ok(Role::Client),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Appointment status. Transitions are owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// A row of `user_profiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    /// Auth identity this profile belongs to
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// The `user_profiles(name, phone, avatar_url)` projection embedded in
/// professional reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A row of `professionals`, optionally joined with its profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub is_available: bool,
    /// Embedded `user_profiles` relation
    #[serde(rename = "user_profiles", default)]
    pub profile: Option<ProfileSummary>,
}

impl Professional {
    /// Display name from the linked profile, empty when not joined.
    pub fn name(&self) -> &str {
        self.profile.as_ref().map_or("", |p| p.name.as_str())
    }

    /// Contact phone from the linked profile, if any.
    pub fn phone(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.phone.as_deref())
            .filter(|phone| !phone.is_empty())
    }
}

/// The `service_categories(name)` projection embedded in service reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryName {
    pub name: String,
}

/// A row of `service_categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// A row of `services`, optionally joined with its category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    /// Duration in minutes
    pub duration: u32,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Embedded `service_categories` relation
    #[serde(rename = "service_categories", default)]
    pub category: Option<CategoryName>,
}

/// The `services(price)` projection embedded in appointment reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServicePrice {
    #[serde(default)]
    pub price: Option<f64>,
}

/// A row of `appointments`, optionally joined with its service price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub appointment_date: NaiveDate,
    /// Postgres `time` value, e.g. `14:30:00`
    pub appointment_time: String,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Uuid,
    pub status: AppointmentStatus,
    /// Price override agreed for this appointment
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Embedded `services` relation
    #[serde(rename = "services", default)]
    pub service: Option<ServicePrice>,
}

impl Appointment {
    /// Price this appointment contributes to revenue.
    ///
    /// The override price wins, then the linked service price, then zero.
    /// A zero or NaN price counts as absent at each step.
    pub fn effective_price(&self) -> f64 {
        present(self.total_price)
            .or_else(|| present(self.service.as_ref().and_then(|s| s.price)))
            .unwrap_or(0.0)
    }
}

fn present(price: Option<f64>) -> Option<f64> {
    price.filter(|p| *p != 0.0 && !p.is_nan())
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayStats {
    /// Number of appointments on the day
    pub appointments: usize,
    /// Estimated revenue for the day
    pub revenue: f64,
}

impl DayStats {
    /// Aggregate a day's appointments.
    pub fn from_appointments(appointments: &[Appointment]) -> Self {
        Self {
            appointments: appointments.len(),
            revenue: appointments.iter().map(Appointment::effective_price).sum(),
        }
    }
}

/// A row of `banners`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

/// Opening hours for one day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

impl DayHours {
    /// Text shown next to the weekday.
    pub fn describe(&self) -> String {
        if self.closed {
            return "Fechado".to_string();
        }
        format!(
            "{} - {}",
            self.open.as_deref().unwrap_or(""),
            self.close.as_deref().unwrap_or("")
        )
    }
}

/// Weekly opening hours keyed by weekday, kept in the order the studio
/// configured them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpeningHours {
    pub days: Vec<(String, DayHours)>,
}

impl Serialize for OpeningHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, hours) in &self.days {
            map.serialize_entry(day, hours)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OpeningHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HoursVisitor;

        impl<'de> Visitor<'de> for HoursVisitor {
            type Value = OpeningHours;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of weekday to opening hours")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut days = Vec::with_capacity(access.size_hint().unwrap_or(7));
                while let Some((day, hours)) = access.next_entry::<String, Option<DayHours>>()? {
                    days.push((day, hours.unwrap_or_default()));
                }
                Ok(OpeningHours { days })
            }
        }

        deserializer.deserialize_map(HoursVisitor)
    }
}

/// The singleton `studio_config` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

/// Profile fields sent along with a sign-up.
///
/// The backend turns these into the new user's `user_profiles` row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignUpProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Portuguese label for a weekday key, or the key itself when unknown.
pub fn weekday_label(day: &str) -> &str {
    match day {
        "monday" => "Segunda",
        "tuesday" => "Terça",
        "wednesday" => "Quarta",
        "thursday" => "Quinta",
        "friday" => "Sexta",
        "saturday" => "Sábado",
        "sunday" => "Domingo",
        other => other,
    }
}

/// Apply the Brazilian mobile mask `(DD) DDDDD-DDDD` while typing.
///
/// Input longer than eleven digits is returned untouched.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        n if n > 11 => input.to_string(),
        _ => digits,
    }
}

/// Digits of a phone number, for building chat links.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Instagram handle without its leading `@`.
pub fn instagram_handle(raw: &str) -> String {
    raw.replacen('@', "", 1)
}

/// Uppercased first letter of a name, for avatar fallbacks.
pub fn avatar_initial(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

/// Price in reais, e.g. `R$ 45.00`.
pub fn format_price(value: f64) -> String {
    format!("R$ {value:.2}")
}

fn default_true() -> bool {
    true
}
