//! Optional interpretive text.
//!
//! Prompts are built from a finished [`ChartReport`]; a [`Narrator`] turns
//! each one into prose. Narration never fails a chart: any error is logged
//! and the text is left empty.

use crate::report::ChartReport;
use crate::western::House;
use serde::Serialize;
use thiserror::Error;

/// Aspects listed in the advice prompt.
const ADVICE_ASPECTS: usize = 8;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NarrativeError {
    #[error("Narrative generation is disabled")]
    Disabled,
    #[error("Narrative generation failed: {message}")]
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Sun,
    Moon,
    Ascendant,
    ChartRuler,
    Advice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativePrompt {
    pub topic: Topic,
    /// Chart facts the text must cover
    pub subject: String,
    /// What the text should explain about them
    pub focus: String,
    pub words: usize,
}

impl NarrativePrompt {
    /// Instruction text for a free-form text generator.
    pub fn instruction(&self) -> String {
        format!(
            "In about {} words, interpret the following natal chart facts: {}. Explain {}.",
            self.words, self.subject, self.focus
        )
    }
}

pub trait Narrator {
    fn generate(&self, prompt: &NarrativePrompt) -> Result<String, NarrativeError>;
}

impl<N: Narrator + ?Sized> Narrator for Box<N> {
    fn generate(&self, prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
        (**self).generate(prompt)
    }
}

/// Deterministic text assembled from the prompt itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl Narrator for TemplateNarrator {
    fn generate(&self, prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
        let text = match prompt.topic {
            Topic::Advice => format!(
                "Chart overview. {}.\n\nThis reading looks at {}. Treat it as a map of tendencies rather than a verdict.",
                prompt.subject, prompt.focus
            ),
            _ => format!("{}. This placement describes {}.", prompt.subject, prompt.focus),
        };
        Ok(text)
    }
}

/// Narrator used when narration is switched off; every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNarrator;

impl Narrator for DisabledNarrator {
    fn generate(&self, _prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
        Err(NarrativeError::Disabled)
    }
}

fn house_list(houses: &[House]) -> String {
    if houses.is_empty() {
        return "no houses".to_string();
    }
    houses
        .iter()
        .map(|h| format!("house {}", h))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One prompt per Four Kings row, in row order.
pub fn king_prompts(report: &ChartReport) -> Vec<NarrativePrompt> {
    report
        .four_kings
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (topic, subject, focus) = match i {
                0 => (
                    Topic::Sun,
                    format!("Sun in {}, house {}", row.sign, row.house),
                    "the core of personality and how vital energy is expressed",
                ),
                1 => (
                    Topic::Moon,
                    format!("Moon in {}, house {}", row.sign, row.house),
                    "emotional needs and where a sense of security comes from",
                ),
                2 => (
                    Topic::Ascendant,
                    format!("Ascendant in {}", row.sign),
                    "outward image, style of interaction and first impressions",
                ),
                _ => {
                    let ruled = report
                        .positions
                        .iter()
                        .find(|p| p.point == row.point)
                        .map(|p| house_list(&p.ruled_houses))
                        .unwrap_or_else(|| house_list(&[]));
                    (
                        Topic::ChartRuler,
                        format!(
                            "chart ruler {} in {}, house {}, ruling {}",
                            row.point, row.sign, row.house, ruled
                        ),
                        "where the life direction shown by the chart ruler plays out",
                    )
                }
            };
            NarrativePrompt {
                topic,
                subject,
                focus: focus.to_string(),
                words: 50,
            }
        })
        .collect()
}

/// Overall reading: Sun, Moon, Ascendant, house focus of the ten bodies and
/// the strongest aspects.
pub fn advice_prompt(report: &ChartReport) -> NarrativePrompt {
    let sun = &report.bodies[0];
    let moon = &report.bodies[1];

    let house_focus = report
        .bodies
        .iter()
        .map(|b| format!("{} house {}", b.body, b.house))
        .collect::<Vec<_>>()
        .join(", ");

    let aspects = if report.aspects.is_empty() {
        "no major aspects".to_string()
    } else {
        report
            .aspects
            .iter()
            .take(ADVICE_ASPECTS)
            .map(|a| format!("{} {} ({:.2}°)", a.pair_label(), a.kind, a.deviation))
            .collect::<Vec<_>>()
            .join(", ")
    };

    NarrativePrompt {
        topic: Topic::Advice,
        subject: format!(
            "Sun in {} house {}; Moon in {} house {}; Ascendant in {}; house focus: {}; major aspects: {}",
            sun.sign, sun.house, moon.sign, moon.house, report.ascendant.sign, house_focus, aspects
        ),
        focus: "how the house placements shape areas of life, with practical advice on learning, work, \
                relationships and emotional balance"
            .to_string(),
        words: 500,
    }
}

fn generate_or_empty<N: Narrator + ?Sized>(narrator: &N, prompt: &NarrativePrompt) -> String {
    match narrator.generate(prompt) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            log::warn!("Narrative for {:?} unavailable: {}", prompt.topic, e);
            String::new()
        }
    }
}

/// Fill the Four Kings interpretations and the advice text of `report`.
pub fn narrate<N: Narrator + ?Sized>(narrator: &N, report: &mut ChartReport) {
    let prompts = king_prompts(report);
    for (row, prompt) in report.four_kings.iter_mut().zip(&prompts) {
        row.interpretation = generate_or_empty(narrator, prompt);
    }
    report.advice = generate_or_empty(narrator, &advice_prompt(report));
    report.narrative_generated = true;
}
