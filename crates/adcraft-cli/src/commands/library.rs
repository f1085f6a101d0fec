use crate::bootstrap::AppContext;
use adcraft_core::session::SessionGate;
use anyhow::{Result, bail};

pub async fn run(app: &AppContext, json: bool) -> Result<()> {
    let Some(user) = app.gate.current() else {
        bail!("Not signed in. Run `adcraft sign-in <user-id>` first.");
    };

    app.controller.load(Some(&user)).await?;
    let state = app.controller.snapshot().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&state.records)?);
        return Ok(());
    }

    if state.is_empty() {
        println!("No creatives yet for {}", user.label());
        return Ok(());
    }

    for record in &state.records {
        println!(
            "{}  {:<8}  {}",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.kind.to_string(),
            record.title
        );
    }
    Ok(())
}
