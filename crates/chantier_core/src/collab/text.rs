//! Text generation for daily reports and risk analysis.
//!
//! # Invariants
//! - One request per call; no retry, timeout or cancellation.
//! - Failures are logged by category and returned as a fixed in-band
//!   message, never as an error.

use crate::config::CoreConfig;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DAILY_REPORT_FAILURE: &str = "Une erreur est survenue lors de la génération du rapport. Veuillez vérifier la console pour plus de détails.";
pub const RISK_ANALYSIS_FAILURE: &str = "Une erreur est survenue lors de l'analyse des risques. Veuillez vérifier la console pour plus de détails.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No generator configured or reachable.
    Unavailable(String),
    /// The generator answered with no text.
    EmptyResponse,
    /// The generator reported a failure.
    Failed(String),
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "text generator unavailable: {reason}"),
            Self::EmptyResponse => write!(f, "text generator returned an empty response"),
            Self::Failed(reason) => write!(f, "text generation failed: {reason}"),
        }
    }
}

impl Error for GenerationError {}

impl GenerationError {
    fn category(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::EmptyResponse => "empty_response",
            Self::Failed(_) => "failed",
        }
    }
}

/// External model that turns a prompt into Markdown.
pub trait TextGenerator {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// Builds prompts, calls the generator and folds failures into text.
pub struct ReportAssistant<G: TextGenerator> {
    generator: G,
    report_model: String,
    risk_model: String,
}

impl<G: TextGenerator> ReportAssistant<G> {
    pub fn new(generator: G, report_model: impl Into<String>, risk_model: impl Into<String>) -> Self {
        Self {
            generator,
            report_model: report_model.into(),
            risk_model: risk_model.into(),
        }
    }

    /// Assistant using the report and risk models named in `config`.
    pub fn from_config(generator: G, config: &CoreConfig) -> Self {
        Self::new(generator, config.report_model.clone(), config.risk_model.clone())
    }

    /// Markdown daily site report from key points, or the failure message.
    pub fn generate_daily_report(&self, points: &str) -> String {
        let prompt = daily_report_prompt(points);
        self.run("daily_report", &self.report_model, &prompt, DAILY_REPORT_FAILURE)
    }

    /// Markdown risk table for a site situation, or the failure message.
    pub fn analyze_risks(&self, situation: &str) -> String {
        let prompt = risk_analysis_prompt(situation);
        self.run("risk_analysis", &self.risk_model, &prompt, RISK_ANALYSIS_FAILURE)
    }

    fn run(&self, event: &str, model: &str, prompt: &str, fallback: &str) -> String {
        match self.generator.generate(model, prompt) {
            Ok(text) if !text.trim().is_empty() => {
                log::info!("event={event} module=collab status=ok chars={}", text.len());
                text
            }
            Ok(_) => {
                log::error!("event={event} module=collab status=error error=empty_response");
                fallback.to_string()
            }
            Err(err) => {
                log::error!(
                    "event={event} module=collab status=error error={}",
                    err.category()
                );
                fallback.to_string()
            }
        }
    }
}

pub fn daily_report_prompt(points: &str) -> String {
    format!(
        "Tu es un chef de chantier expérimenté. En te basant sur les points clés suivants, \
rédige un rapport de chantier quotidien clair, professionnel et bien structuré au format \
Markdown. Le rapport doit inclure une section 'Progression des Travaux', 'Problèmes \
Rencontrés' et 'Plan pour Demain'.\n\nPoints clés :\n{points}"
    )
}

pub fn risk_analysis_prompt(situation: &str) -> String {
    format!(
        "En tant qu'expert en sécurité sur les chantiers de construction (HSE), identifie les \
risques potentiels associés à la situation suivante. Pour chaque risque, décris-le, évalue \
son niveau de gravité (Faible, Moyen, Élevé) et propose des mesures de prévention ou de \
mitigation concrètes. Présente l'analyse sous forme de tableau Markdown.\n\nSituation :\n{situation}"
    )
}
