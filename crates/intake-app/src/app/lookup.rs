use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::IntakeConfig;
use intake_api::{AppointmentClient, LookupError};
use intake_types::Appointment;

/// Look up one appointment and print it. Returns false when nothing could be shown.
pub async fn run_lookup(config: &IntakeConfig, id: &str) -> Result<bool> {
    let client = AppointmentClient::with_options(&config.client_options())
        .context("Failed to build HTTP client")?;

    match client.lookup(id).await {
        Ok(appointment) => {
            println!("{}", format_appointment(&appointment));
            Ok(true)
        }
        Err(e) => {
            report_lookup_error(&e);
            Ok(false)
        }
    }
}

fn report_lookup_error(error: &LookupError) {
    log::debug!("appointment lookup failed: {}", error);
    eprintln!("{} {}", "❌".bright_red(), error.user_message().bright_red());
}

/// Labelled multi-line summary of an appointment
pub fn format_appointment(appointment: &Appointment) -> String {
    let mut lines = vec![
        format!("{}", "📋 예약 정보".bright_cyan().bold()),
        row("예약번호", &appointment.appointment_id),
        row("환자명", &appointment.patient_name),
        row("진료과", &appointment.department),
        row("예약일시", &appointment.schedule_display()),
        row("상태", appointment.status.label()),
    ];
    if let Some(created_at) = appointment.created_at {
        lines.push(row("접수일시", &created_at.format("%Y-%m-%d %H:%M").to_string()));
    }
    lines.join("\n")
}

fn row(label: &str, value: &str) -> String {
    format!("  {}: {}", label.bold(), value)
}
