//! Prompt construction for creative generation.
//!
//! [`build`] maps a validated [`GenerationRequest`] to the instruction text sent
//! to the generator and the title stored with the resulting record. Each
//! [`CreativeKind`] has its own template; the match in [`PromptSpec::for_kind`]
//! is the only place a new kind has to be wired in.

mod templates;

use crate::creative::{CreativeKind, GenerationRequest};
use minijinja::{Environment, UndefinedBehavior, context};
use std::sync::LazyLock;

/// Instruction text plus display title for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub text: String,
    pub title: String,
}

/// Template rendering failed.
///
/// Does not occur with the built-in templates: they are compiled once and
/// only reference variables that [`build`] always supplies.
#[derive(Debug, thiserror::Error)]
#[error("Failed to render {kind} prompt: {source}")]
pub struct PromptError {
    kind: CreativeKind,
    #[source]
    source: minijinja::Error,
}

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    for (name, source) in templates::ALL {
        if let Err(err) = env.add_template(name, source) {
            tracing::error!(target: "generation", template = name, "Prompt template does not compile: {}", err);
        }
    }
    env
});

/// Per-kind template and default goal.
struct PromptSpec {
    template_name: &'static str,
    default_goal: &'static str,
}

impl PromptSpec {
    fn for_kind(kind: CreativeKind) -> Self {
        match kind {
            CreativeKind::Copy => Self {
                template_name: templates::COPY,
                default_goal: "increase engagement and drive conversions",
            },
            CreativeKind::Visual => Self {
                template_name: templates::VISUAL,
                default_goal: "capture attention and communicate the product's value",
            },
            CreativeKind::Campaign => Self {
                template_name: templates::CAMPAIGN,
                default_goal: "build brand awareness and grow sales",
            },
        }
    }
}

/// Builds the prompt text and record title for `request`.
///
/// Blank tone and platform fall back to their defaults; constraints only
/// appear in the prompt when present.
pub fn build(request: &GenerationRequest) -> Result<BuiltPrompt, PromptError> {
    let spec = PromptSpec::for_kind(request.kind);
    let goals = request.goals.as_deref().unwrap_or(spec.default_goal);

    let text = ENV
        .get_template(spec.template_name)
        .and_then(|template| {
            template.render(context! {
                product => &request.product,
                industry => &request.industry,
                target_audience => &request.target_audience,
                tone => request.effective_tone(),
                platform => request.effective_platform(),
                goals => goals,
                constraints => request.constraints.as_deref(),
            })
        })
        .map_err(|source| PromptError {
            kind: request.kind,
            source,
        })?;

    Ok(BuiltPrompt {
        text,
        title: title_for(request.kind, &request.product),
    })
}

/// Deterministic record title, e.g. `"Campaign Strategy for Oat Milk"`.
pub fn title_for(kind: CreativeKind, product: &str) -> String {
    format!("{} for {}", kind.title_label(), product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creative::CreativeForm;
    use strum::IntoEnumIterator;

    fn running_shoes(kind: CreativeKind) -> GenerationRequest {
        CreativeForm {
            industry: "Fitness".to_string(),
            product: "Running Shoes".to_string(),
            target_audience: "Runners".to_string(),
            tone: String::new(),
            platform: String::new(),
            ..Default::default()
        }
        .validate(kind)
        .unwrap()
    }

    #[test]
    fn test_all_templates_compile() {
        for (name, _) in templates::ALL {
            assert!(ENV.get_template(name).is_ok(), "{name} does not compile");
        }
        for kind in CreativeKind::iter() {
            assert!(ENV.get_template(PromptSpec::for_kind(kind).template_name).is_ok());
        }
    }

    #[test]
    fn test_build_succeeds_for_every_optional_field_combination() {
        for kind in CreativeKind::iter() {
            for (goals, constraints) in [
                (None, None),
                (Some("Launch"), None),
                (None, Some("No slang")),
                (Some("Launch"), Some("No slang")),
            ] {
                let mut request = running_shoes(kind);
                request.goals = goals.map(str::to_string);
                request.constraints = constraints.map(str::to_string);
                assert!(build(&request).is_ok(), "{kind} failed for {goals:?}/{constraints:?}");
            }
        }
    }

    #[test]
    fn test_copy_prompt_scenario() {
        let built = build(&running_shoes(CreativeKind::Copy)).unwrap();

        assert!(built.text.contains("Running Shoes"));
        assert!(built.text.contains("Fitness"));
        assert!(built.text.contains("Runners"));
        assert!(built.text.contains("Tone: professional"));
        assert!(built.text.contains("Platform: general"));
        assert!(built.text.contains("3 ad copy variations"));
        assert_eq!(built.title, "Ad Copy for Running Shoes");
    }

    #[test]
    fn test_every_kind_embeds_request_fields() {
        for kind in CreativeKind::iter() {
            let built = build(&running_shoes(kind)).unwrap();
            assert!(!built.text.trim().is_empty());
            for needle in ["Running Shoes", "Fitness", "Runners"] {
                assert!(built.text.contains(needle), "{kind} prompt missing {needle}");
            }
            assert_eq!(
                built.title,
                format!("{} for Running Shoes", kind.title_label())
            );
        }
    }

    #[test]
    fn test_titles_per_kind() {
        assert_eq!(title_for(CreativeKind::Visual, "Tea"), "Visual Concepts for Tea");
        assert_eq!(
            title_for(CreativeKind::Campaign, "Tea"),
            "Campaign Strategy for Tea"
        );
    }

    #[test]
    fn test_constraints_only_when_present() {
        let without = build(&running_shoes(CreativeKind::Visual)).unwrap();
        assert!(!without.text.contains("Constraints:"));

        let mut request = running_shoes(CreativeKind::Visual);
        request.constraints = Some("No competitor logos".to_string());
        let with = build(&request).unwrap();
        assert!(with.text.contains("Constraints: No competitor logos"));
    }

    #[test]
    fn test_default_goal_and_custom_goal() {
        let default_goal = build(&running_shoes(CreativeKind::Campaign)).unwrap();
        assert!(default_goal.text.contains("Goals: build brand awareness and grow sales"));

        let mut request = running_shoes(CreativeKind::Campaign);
        request.goals = Some("Sell out the spring line".to_string());
        let custom = build(&request).unwrap();
        assert!(custom.text.contains("Goals: Sell out the spring line"));
    }

    #[test]
    fn test_kind_specific_sections() {
        let visual = build(&running_shoes(CreativeKind::Visual)).unwrap();
        for section in ["Composition", "Color palette", "Typography", "Layout", "Call-to-action"] {
            assert!(visual.text.contains(section));
        }

        let campaign = build(&running_shoes(CreativeKind::Campaign)).unwrap();
        for section in ["Campaign theme", "Multi-channel plan", "Content calendar", "KPIs", "Budget allocation", "Timeline"] {
            assert!(campaign.text.contains(section));
        }
    }
}
