//! Instruction templates, one per creative kind.
//!
//! Rendered with minijinja; `trim_blocks` and `lstrip_blocks` are enabled so
//! the conditional sections leave no blank lines behind. Every template is
//! registered under its name in [`ALL`].

pub(super) const COPY: &str = "copy.txt";
pub(super) const VISUAL: &str = "visual.txt";
pub(super) const CAMPAIGN: &str = "campaign.txt";

pub(super) const ALL: [(&str, &str); 3] = [
    (COPY, COPY_TEMPLATE),
    (VISUAL, VISUAL_TEMPLATE),
    (CAMPAIGN, CAMPAIGN_TEMPLATE),
];

const COPY_TEMPLATE: &str = r#"You are an expert advertising copywriter.

Create compelling ad copy for {{ product }} in the {{ industry }} industry.

Target audience: {{ target_audience }}
Tone: {{ tone }}
Platform: {{ platform }}
Goals: {{ goals }}
{% if constraints %}
Constraints: {{ constraints }}
{% endif %}

Write exactly 3 ad copy variations. For each variation provide:
1. Headline: a short, attention-grabbing headline
2. Body: persuasive body copy suited to {{ platform }}
3. Call to action: a clear next step for the reader

Label the variations "Variation 1", "Variation 2" and "Variation 3".
Keep every variation in a {{ tone }} tone and speak directly to {{ target_audience }}."#;

const VISUAL_TEMPLATE: &str = r#"You are a senior creative director specialising in advertising visuals.

Describe visual concepts for an ad promoting {{ product }} in the {{ industry }} industry.

Target audience: {{ target_audience }}
Tone: {{ tone }}
Platform: {{ platform }}
Goals: {{ goals }}
{% if constraints %}
Constraints: {{ constraints }}
{% endif %}

Produce exactly 3 distinct visual concept descriptions. For each concept cover:
1. Composition: subject, framing and focal point
2. Color palette: primary and accent colors and the mood they create
3. Typography: typeface style and hierarchy for headline and supporting text
4. Layout: arrangement of imagery, copy and brand elements for {{ platform }}
5. Call-to-action placement: where the CTA sits and how it stands out

Label the concepts "Concept 1", "Concept 2" and "Concept 3"."#;

const CAMPAIGN_TEMPLATE: &str = r#"You are a marketing strategist planning an advertising campaign.

Develop a campaign strategy for {{ product }} in the {{ industry }} industry.

Target audience: {{ target_audience }}
Tone: {{ tone }}
Primary platform: {{ platform }}
Goals: {{ goals }}
{% if constraints %}
Constraints: {{ constraints }}
{% endif %}

Write one complete strategy with these sections:
1. Campaign theme: the core idea and key message
2. Multi-channel plan: how {{ platform }} and supporting channels work together
3. Content calendar: a week-by-week outline of what is published where
4. KPIs: measurable indicators of success for each goal
5. Budget allocation: percentage split across channels and activities
6. Timeline: phases from launch to wrap-up with milestones"#;
