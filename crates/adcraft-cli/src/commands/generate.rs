use crate::GenerateArgs;
use crate::bootstrap::AppContext;
use adcraft_core::creative::CreativeForm;
use adcraft_core::session::SessionGate;
use anyhow::{Result, bail};

pub async fn run(app: &AppContext, args: GenerateArgs) -> Result<()> {
    let Some(user) = app.gate.current() else {
        bail!("Not signed in. Run `adcraft sign-in <user-id>` first.");
    };

    // Load first so the new record lands on top of the existing library.
    if let Err(err) = app.controller.load(Some(&user)).await {
        tracing::warn!("Continuing without existing library: {}", err);
    }

    let form = CreativeForm {
        industry: args.industry,
        product: args.product,
        target_audience: args.audience,
        tone: args.tone,
        platform: args.platform,
        goals: args.goals,
        constraints: args.constraints,
    };

    tracing::info!(
        provider = %app.config.generation.provider,
        kind = %args.kind,
        "Generating creative"
    );
    let outcome = app
        .controller
        .generate(Some(&user), args.kind, &form)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.record)?);
        return Ok(());
    }

    println!("# {}", outcome.record.title);
    println!();
    println!("{}", outcome.record.content);
    println!();
    if outcome.record.confirmed {
        println!("{}", args.kind.success_label());
    } else {
        println!("{} (not saved)", args.kind.success_label());
    }
    Ok(())
}
