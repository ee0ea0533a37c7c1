use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;
use tracing::{error, info};

use crate::config::MailerConfig;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[day]/[month]/[year]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

/// Everything the confirmation template needs, resolved by the booking
/// handler before the response is sent.
#[derive(Debug, Clone)]
pub struct AppointmentEmail {
    pub customer_name: String,
    pub customer_email: String,
    pub professional_name: String,
    pub service_name: String,
    pub starts_at: PrimitiveDateTime,
}

#[derive(Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

/// Best-effort transactional mail over a Resend-style HTTP API. Without
/// credentials every send is a logged no-op; with them, delivery runs on a
/// detached task so a slow or failing provider never delays a booking
/// response, and a booking is never rolled back over a lost e-mail.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<Transport>,
}

#[derive(Clone)]
struct Transport {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    from_address: String,
}

impl Mailer {
    pub fn from_config(config: Option<&MailerConfig>) -> Self {
        let transport = config.map(|config| Transport {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        });
        if transport.is_none() {
            info!("No mailer credentials configured; confirmation e-mails disabled");
        }
        Self { transport }
    }

    /// Fire-and-forget: returns immediately, failures are logged and
    /// swallowed.
    pub fn send_appointment_confirmation(&self, email: AppointmentEmail) {
        let Some(transport) = self.transport.clone() else {
            info!(
                customer = %email.customer_email,
                "Mailer disabled, skipping appointment confirmation"
            );
            return;
        };

        tokio::spawn(async move {
            if let Err(err) = transport.deliver(&email).await {
                error!(
                    customer = %email.customer_email,
                    "Failed to send appointment confirmation: {err}"
                );
            }
        });
    }
}

impl Transport {
    async fn deliver(&self, email: &AppointmentEmail) -> anyhow::Result<()> {
        let date = email.starts_at.date().format(&DATE_FORMAT)?;
        let time = email.starts_at.time().format(&TIME_FORMAT)?;

        let body = SendEmailRequest {
            from: self.from_address.clone(),
            to: vec![email.customer_email.clone()],
            subject: "Your appointment is booked".to_string(),
            html: format!(
                "<div style=\"font-family: sans-serif; color: #333;\">\
                 <h1>Hi, {customer}!</h1>\
                 <p>Your appointment is on the calendar:</p>\
                 <div style=\"border: 1px solid #ddd; padding: 20px; border-radius: 8px;\">\
                 <p><strong>Professional:</strong> {professional}</p>\
                 <p><strong>Service:</strong> {service}</p>\
                 <p><strong>Date:</strong> {date} at {time}</p>\
                 </div>\
                 <p>Need to reschedule? Manage your booking in the app.</p>\
                 </div>",
                customer = email.customer_name,
                professional = email.professional_name,
                service = email.service_name,
            ),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        response.error_for_status()?;
        info!(customer = %email.customer_email, "Appointment confirmation sent");
        Ok(())
    }
}
