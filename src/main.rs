//! formstate - walkthrough of the customer form
//!
//! Fills the form the way a user would, prints the feedback it produces and
//! submits the result to the log.

use anyhow::Result;
use formstate::config::FormConfig;
use formstate::customer::{paths, CustomerForm};
use formstate::sink::LogSink;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = FormConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut customer = CustomerForm::new(&config)?;
    customer.populate_test_data()?;
    customer.form_mut().mark_touched("")?;

    customer.set_notification("text")?;
    if let Some(errors) = customer.form().errors(paths::PHONE)? {
        info!("Phone now reports: {errors}");
    }
    customer.form_mut().set_value(paths::PHONE, "555-0100")?;

    customer.form_mut().set_value(paths::EMAIL, "wouldiuseit@")?;
    match customer.next_email_message().await {
        Some(message) => info!("Email feedback: {message:?}"),
        None => warn!("Email feedback channel closed"),
    }

    customer
        .form_mut()
        .set_value(paths::EMAIL, "wouldiuseit@hellno.com")?;
    customer
        .form_mut()
        .set_value(paths::CONFIRM_EMAIL, "wouldiuseit@hellno.com")?;
    customer.form_mut().set_value(paths::RATING, 4)?;

    let index = customer.add_address()?;
    customer
        .form_mut()
        .set_value(&format!("{}.{index}.city", paths::ADDRESSES), "Springfield")?;

    if let Some(message) = customer.next_email_message().await {
        info!("Email feedback: {message:?}");
    }

    customer.submit(&LogSink).await?;
    Ok(())
}
