//! Content-view reads and display helpers.
//!
//! Every loader performs one read and never fails: errors are logged and the
//! view gets its empty value.

use backend::{Backend, Query, select, select_single};
use chrono::{NaiveDate, Utc};
use core_types::{
    Appointment, Banner, DayStats, Professional, Service, StudioConfig, instagram_handle,
    phone_digits,
};
use reqwest::Url;
use serde::de::DeserializeOwned;

/// Data for one view plus its loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    pub loading: bool,
    pub data: T,
}

impl<T: Default> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            loading: true,
            data: T::default(),
        }
    }
}

impl<T> Loadable<T> {
    pub fn ready(data: T) -> Self {
        Self {
            loading: false,
            data,
        }
    }
}

/// What a list view shows.
#[derive(Debug, PartialEq)]
pub enum Panel<'a, T> {
    Loading,
    /// Loaded with no rows: the table is empty or the read failed
    Empty,
    Rows(&'a [T]),
}

impl<T> Loadable<Vec<T>> {
    pub fn panel(&self) -> Panel<'_, T> {
        if self.loading {
            Panel::Loading
        } else if self.data.is_empty() {
            Panel::Empty
        } else {
            Panel::Rows(&self.data)
        }
    }
}

pub const STUDIO_WHATSAPP_MESSAGE: &str = "Olá! Gostaria de saber mais sobre os serviços.";

/// Today's date as the backend stores it.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn appointments_on(date: NaiveDate) -> Query {
    Query::table("appointments")
        .select("*, services(price)")
        .eq("appointment_date", date.format("%Y-%m-%d"))
}

pub fn active_banners() -> Query {
    Query::table("banners").eq("is_active", true).order_by("sort_order")
}

/// The singleton studio settings row, shared by every view that shows it.
pub fn studio_config() -> Query {
    Query::table("studio_config").limit(1)
}

pub fn active_services() -> Query {
    Query::table("services")
        .select("*, service_categories(name)")
        .eq("is_active", true)
        .order_by("name")
}

pub fn available_professionals() -> Query {
    Query::table("professionals")
        .select("*, user_profiles(name, phone, avatar_url)")
        .eq("is_available", true)
}

async fn load_rows<T: DeserializeOwned>(backend: &dyn Backend, query: &Query) -> Vec<T> {
    match select::<T, dyn Backend>(backend, query).await {
        Ok(rows) => {
            tracing::debug!(table = query.table_name(), rows = rows.len(), "loaded");
            rows
        }
        Err(e) => {
            tracing::error!(table = query.table_name(), error = %e, "failed to load rows");
            Vec::new()
        }
    }
}

/// Appointment count and estimated revenue for `date`.
pub async fn load_day_stats(backend: &dyn Backend, date: NaiveDate) -> DayStats {
    let appointments: Vec<Appointment> = load_rows(backend, &appointments_on(date)).await;
    DayStats::from_appointments(&appointments)
}

pub async fn load_banners(backend: &dyn Backend) -> Vec<Banner> {
    load_rows(backend, &active_banners()).await
}

pub async fn load_services(backend: &dyn Backend) -> Vec<Service> {
    load_rows(backend, &active_services()).await
}

pub async fn load_professionals(backend: &dyn Backend) -> Vec<Professional> {
    load_rows(backend, &available_professionals()).await
}

pub async fn load_studio_config(backend: &dyn Backend) -> Option<StudioConfig> {
    match select_single::<StudioConfig, dyn Backend>(backend, &studio_config()).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load studio config");
            None
        }
    }
}

/// Chat link to a Brazilian number with a prefilled message.
pub fn whatsapp_link(phone: &str, message: &str) -> Option<String> {
    let digits = phone_digits(phone);
    if digits.is_empty() {
        return None;
    }
    let base = format!("https://wa.me/55{digits}");
    Url::parse_with_params(&base, &[("text", message)])
        .map(String::from)
        .ok()
}

/// Chat link inviting a professional to talk about their services.
pub fn professional_whatsapp_link(name: &str, phone: &str) -> Option<String> {
    whatsapp_link(
        phone,
        &format!("Olá {name}! Gostaria de saber mais sobre seus serviços."),
    )
}

pub fn instagram_url(raw: &str) -> String {
    format!("https://instagram.com/{}", instagram_handle(raw))
}

/// Public entry point for clients on the same origin as the admin panel.
pub fn public_client_url(origin: &str) -> String {
    format!("{}/client", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::memory::MemoryBackend;
    use serde_json::json;

    const SERVICE_ID: &str = "5a8d6a3c-0c1f-4f4e-9a61-1f6f2c5e9b10";

    fn appointment_row(date: &str, total_price: Option<f64>, service_price: Option<f64>) -> serde_json::Value {
        json!({
            "id": "0f5c7a52-3a6e-4a8e-8a7c-8c2f0c1d2e3f",
            "appointment_date": date,
            "appointment_time": "10:00:00",
            "client_id": "1f5c7a52-3a6e-4a8e-8a7c-8c2f0c1d2e3f",
            "professional_id": "2f5c7a52-3a6e-4a8e-8a7c-8c2f0c1d2e3f",
            "service_id": SERVICE_ID,
            "status": "confirmed",
            "total_price": total_price,
            "services": { "price": service_price }
        })
    }

    #[test]
    fn test_loadable_starts_loading() {
        let state = Loadable::<Vec<Service>>::default();
        assert!(state.loading);
        assert!(state.data.is_empty());

        let ready = Loadable::ready(vec![1, 2]);
        assert!(!ready.loading);
    }

    #[test]
    fn test_panel_follows_loading_then_rows() {
        let loading = Loadable::<Vec<u8>>::default();
        assert_eq!(loading.panel(), Panel::Loading);

        assert_eq!(Loadable::ready(Vec::<u8>::new()).panel(), Panel::Empty);

        let rows = Loadable::ready(vec![3u8, 5]);
        assert_eq!(rows.panel(), Panel::Rows(&[3u8, 5][..]));
    }

    #[test]
    fn test_dashboard_query_filters_on_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let params = appointments_on(date).to_params();

        assert!(params.contains(&("appointment_date".to_string(), "eq.2024-05-10".to_string())));
        assert_eq!(params[0].1, "*,services(price)");
    }

    #[tokio::test]
    async fn test_day_stats_revenue_fallbacks() {
        let backend = MemoryBackend::new();
        backend.insert_row("appointments", appointment_row("2024-05-10", Some(10.0), Some(5.0)));
        backend.insert_row("appointments", appointment_row("2024-05-10", None, Some(7.0)));
        backend.insert_row("appointments", appointment_row("2024-05-10", None, None));
        backend.insert_row("appointments", appointment_row("2024-05-09", Some(99.0), None));

        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let stats = load_day_stats(&backend, date).await;

        assert_eq!(stats.appointments, 3);
        assert_eq!(stats.revenue, 17.0);
    }

    #[tokio::test]
    async fn test_failed_read_degrades_to_empty() {
        let backend = MemoryBackend::new();
        backend.fail_table("services");
        backend.fail_table("studio_config");

        assert!(load_services(&backend).await.is_empty());
        assert_eq!(load_studio_config(&backend).await, None);
    }

    #[tokio::test]
    async fn test_services_only_active_sorted_by_name() {
        let backend = MemoryBackend::new();
        for (id, name, active) in [
            ("6a8d6a3c-0c1f-4f4e-9a61-1f6f2c5e9b10", "Manicure", true),
            ("7a8d6a3c-0c1f-4f4e-9a61-1f6f2c5e9b10", "Corte", true),
            ("8a8d6a3c-0c1f-4f4e-9a61-1f6f2c5e9b10", "Luzes", false),
        ] {
            backend.insert_row(
                "services",
                json!({
                    "id": id,
                    "name": name,
                    "price": 50.0,
                    "duration": 45,
                    "is_active": active,
                    "service_categories": { "name": "Cabelo" }
                }),
            );
        }

        let services = load_services(&backend).await;
        let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Corte", "Manicure"]);
        assert_eq!(services[0].category.as_ref().map(|c| c.name.as_str()), Some("Cabelo"));
    }

    #[tokio::test]
    async fn test_studio_config_single_row() {
        let backend = MemoryBackend::new();
        backend.insert_row(
            "studio_config",
            json!({ "id": SERVICE_ID, "name": "Studio Bela", "instagram": "@studiobela" }),
        );

        let config = load_studio_config(&backend).await.unwrap();

        assert_eq!(config.name, "Studio Bela");
        assert_eq!(config.opening_hours, None);
    }

    #[test]
    fn test_whatsapp_link() {
        let link = professional_whatsapp_link("Ana", "(11) 98765-4321").unwrap();

        assert!(link.starts_with("https://wa.me/5511987654321?text="));
        assert!(link.contains("Ana"));
        assert_eq!(whatsapp_link("sem número", STUDIO_WHATSAPP_MESSAGE), None);
    }

    #[test]
    fn test_contact_urls() {
        assert_eq!(instagram_url("@studiobela"), "https://instagram.com/studiobela");
        assert_eq!(
            public_client_url("https://agenda.studio.com"),
            "https://agenda.studio.com/client"
        );
    }
}
