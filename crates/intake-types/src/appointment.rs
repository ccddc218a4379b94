use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Appointment status as reported by the booking service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "확정",
            AppointmentStatus::Pending => "대기",
            AppointmentStatus::Cancelled => "취소",
            AppointmentStatus::Completed => "완료",
        }
    }
}

/// Appointment record returned by `GET /appointments/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: String,
    pub patient_name: String,
    pub department: String,
    /// Free-form date such as "10월 27일"
    pub appointment_date: String,
    /// 24-hour "HH:MM"
    pub appointment_time: String,
    pub status: AppointmentStatus,
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<NaiveDateTime>,
}

impl Appointment {
    /// Date and time the way the lookup form shows them
    pub fn schedule_display(&self) -> String {
        format!(
            "{} {}",
            self.appointment_date,
            format_korean_time(&self.appointment_time)
        )
    }
}

// The service emits naive ISO timestamps; tolerate offsets and junk rather than failing the lookup.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        s.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| s.parse::<DateTime<Local>>().ok().map(|dt| dt.naive_local()))
    }))
}

/// Convert "15:00" into "오후 3시".
///
/// Minutes are dropped, matching the lookup form. Input that does not start with
/// a numeric hour is returned unchanged.
pub fn format_korean_time(time: &str) -> String {
    let hour = time.split(':').next().unwrap_or_default().trim();
    match hour.parse::<u32>() {
        Ok(h) if h < 12 => format!("오전 {}시", h),
        Ok(12) => "오후 12시".to_string(),
        Ok(h) => format!("오후 {}시", h - 12),
        Err(_) => time.to_string(),
    }
}
