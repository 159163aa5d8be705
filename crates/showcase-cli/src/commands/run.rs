//! Scripted walkthrough of the demo app: login, home, trigger points,
//! on-demand content, logout.

use std::sync::Arc;

use anyhow::{Context, Result};
use showcase_application::{UiContext, ViewSnapshot};
use showcase_core::config::ShowcaseConfig;
use showcase_core::{AlwaysAllow, SessionStartError, UserAttributes};
use showcase_infrastructure::InMemoryCxClient;

pub struct RunOptions {
    pub user_id: Option<String>,
    pub fail_start: bool,
    pub debug: bool,
    pub json: bool,
}

pub async fn execute(config: &ShowcaseConfig, options: RunOptions) -> Result<()> {
    let json = options.json;
    let last = walkthrough(config, options).await?;
    if json {
        println!("{}", last.to_json()?);
    } else {
        print_log(&last);
    }
    Ok(())
}

/// Runs the scripted flow and returns the view state after logout.
async fn walkthrough(config: &ShowcaseConfig, options: RunOptions) -> Result<ViewSnapshot> {
    let demo = &config.demo;
    let client = Arc::new(InMemoryCxClient::new(&config.sdk));
    let (handle, context) = UiContext::spawn(client.clone(), Arc::new(AlwaysAllow));
    if options.debug {
        handle.set_debug_mode(true);
    }

    let user_id = options.user_id.unwrap_or_else(|| demo.user_id.clone());
    let attributes = UserAttributes::from([
        ("userType".to_string(), demo.user_type.clone()),
        ("platform".to_string(), "cli".to_string()),
    ]);

    if options.fail_start {
        client.fail_next_start(SessionStartError::network(
            "The Internet connection appears to be offline.",
        ));
        if let Err(err) = handle
            .start_session(user_id.clone(), Some(attributes.clone()))
            .await
        {
            tracing::info!("[Run] Login failed ({}), retrying", err);
        }
    }
    handle
        .start_session(user_id.clone(), Some(attributes))
        .await
        .with_context(|| format!("Login failed for '{}'", user_id))?;

    handle.setup_content_refresh(demo.trigger_points.clone(), demo.presentation_type)?;
    if let Some(trigger_point) = &demo.button_trigger_point {
        handle.setup_button_content_monitoring(trigger_point.clone())?;
    }
    let home = handle.snapshot().await?;
    if !options.json {
        print_home(client.organization_code(), &home);
    }

    for trigger_point in &demo.trigger_points {
        if !home.triggers_with_content.contains(trigger_point) {
            continue;
        }
        handle.trigger_point(trigger_point.clone())?;
        handle.snapshot().await?;
        client.dismiss_content();
    }

    if home.has_user_triggered_content {
        handle.show_user_triggered_content(home.user_triggered_content_trigger_point.clone())?;
        handle.snapshot().await?;
        client.dismiss_content();
    }

    handle.end_session()?;
    let last = handle.snapshot().await?;
    handle.shutdown()?;
    context.await.context("View model task failed")?;
    Ok(last)
}

fn print_home(organization_code: &str, home: &ViewSnapshot) {
    println!(
        "Logged in as {} ({})",
        home.current_user_id.as_deref().unwrap_or("-"),
        organization_code
    );
    if home.triggers_with_content.is_empty() {
        println!("No trigger points have content");
    } else {
        let codes: Vec<&str> = home.triggers_with_content.iter().map(String::as_str).collect();
        println!("Trigger points with content: {}", codes.join(", "));
    }
    match &home.user_triggered_content_trigger_point {
        Some(trigger_point) if home.has_user_triggered_content => {
            println!("On-demand content available for {}", trigger_point)
        }
        _ => println!("No on-demand content"),
    }
    println!();
}

fn print_log(snapshot: &ViewSnapshot) {
    println!("Event log ({} events, newest first):", snapshot.analytics_events.len());
    for event in &snapshot.analytics_events {
        let marker = if event.category.is_failure() { '!' } else { ' ' };
        println!("{} {}", marker, event);
    }
}
