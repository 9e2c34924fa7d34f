use std::time::Duration;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tokio_retry::{strategy::FixedInterval, Retry};

use crate::config::commentary::CommentarySettings;
use crate::models::commentary::{CommentaryError, CommentaryRequest, GenerateResponse};
use crate::models::tournament::{MatchResult, ResultType, Team};
use crate::tournament::resolver::Narrator;

/// Narrative generator for the rich match mode.
///
/// Talks to an Ollama-compatible `/api/generate` endpoint when a service URL
/// is configured, otherwise writes a template commentary locally.
#[derive(Clone)]
pub struct CommentaryService {
    client: Client,
    base_url: Option<String>,
    model_name: String,
    api_key: Option<SecretString>,
    timeout: Duration,
    max_retries: usize,
}

impl CommentaryService {
    pub fn new(settings: &CommentarySettings) -> Result<Self, CommentaryError> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let client = Client::builder()
            .timeout(timeout + Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: settings
                .service_url
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            model_name: settings.model_name.clone(),
            api_key: settings.api_key.clone(),
            timeout,
            max_retries: settings.max_retries,
        })
    }

    /// Template-only narrator, no network access
    pub fn offline() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            model_name: String::new(),
            api_key: None,
            timeout: Duration::from_secs(1),
            max_retries: 0,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.base_url.is_some()
    }

    /// Generate commentary with retry logic. Errors are returned to the
    /// caller, which decides how to degrade.
    pub async fn generate_commentary(&self, request: &CommentaryRequest) -> Result<String, CommentaryError> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Ok(template_commentary(request));
        };

        let retry_strategy = FixedInterval::from_millis(500).take(self.max_retries);

        let result = Retry::spawn(retry_strategy, || self.call_generator(base_url, request)).await;

        if let Err(e) = &result {
            tracing::error!(
                "Commentary service call failed after {} retries: {:?}",
                self.max_retries, e
            );
        }
        result
    }

    /// Make actual HTTP call
    async fn call_generator(&self, base_url: &str, request: &CommentaryRequest) -> Result<String, CommentaryError> {
        tracing::debug!("Requesting commentary for {} vs {}", request.team_a, request.team_b);

        let body = json!({
            "model": self.model_name,
            "prompt": build_prompt(request),
            "stream": false,
            "options": {
                "temperature": 0.8,
                "num_predict": 800
            }
        });

        let mut call = self.client
            .post(format!("{}/api/generate", base_url))
            .json(&body)
            .timeout(self.timeout);
        if let Some(api_key) = &self.api_key {
            call = call.bearer_auth(api_key.expose_secret());
        }

        let response = call
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CommentaryError::Timeout
                } else {
                    CommentaryError::NetworkError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                429 => CommentaryError::RateLimited,
                500..=599 => CommentaryError::ServiceUnavailable(error_text),
                _ => CommentaryError::InvalidResponse(format!("HTTP {}: {}", status, error_text))
            });
        }

        let text = response.text().await?;
        let generated: GenerateResponse = serde_json::from_str(&text)?;

        let commentary = generated.response.trim();
        if commentary.is_empty() {
            return Err(CommentaryError::InvalidResponse("Empty content".to_string()));
        }

        if let Some(model) = generated.model {
            tracing::debug!("Commentary generated by model {}", model);
        }

        Ok(commentary.to_string())
    }

    /// Health check for the commentary service
    pub async fn health_check(&self) -> bool {
        let Some(base_url) = self.base_url.as_deref() else {
            return true;
        };

        match self.client
            .get(format!("{}/api/tags", base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Commentary health check failed: {}", e);
                false
            }
        }
    }
}

impl Narrator for CommentaryService {
    async fn narrate(
        &self,
        team_a: &Team,
        team_b: &Team,
        result: &MatchResult,
    ) -> Result<String, CommentaryError> {
        let request = CommentaryRequest::from_result(team_a, team_b, result);
        self.generate_commentary(&request).await
    }
}

/// Prompt pinning the generator to the decided result
fn build_prompt(request: &CommentaryRequest) -> String {
    let goals = if request.goals.is_empty() {
        "No goals were scored.".to_string()
    } else {
        request
            .goals
            .iter()
            .map(|goal| format!("- {}' {} ({})", goal.minute, goal.scorer, goal.team))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let decided = match request.result_type {
        ResultType::Penalties => " The match was level after 90 minutes and decided on penalties.",
        ResultType::ExtraTime => " The match was decided in extra time.",
        ResultType::RegularTime => "",
    };

    format!(
        "You are a football commentator for an African Football League match between {} and {}.\n\
        The result is final and must not be changed: {} {} - {} {}.{}\n\
        Goals in order:\n{}\n\
        Winner: {}.\n\
        Write exciting, realistic commentary of the 90 minutes that mentions every goal \
        with its scorer and minute. Keep it engaging but concise (300-400 words) and \
        end with the final score and the winner. Reply with the commentary text only.",
        request.team_a,
        request.team_b,
        request.team_a,
        request.score_a,
        request.score_b,
        request.team_b,
        decided,
        goals,
        request.winner.as_deref().unwrap_or("none, the match was drawn"),
    )
}

/// Commentary used when no generator is configured
pub fn template_commentary(request: &CommentaryRequest) -> String {
    let mut commentary = format!("⚽ {} vs {}\n\n", request.team_a, request.team_b);
    commentary.push_str("An intense match at the stadium! ");

    for goal in &request.goals {
        commentary.push_str(&format!(
            "{} scores for {} in the {}' minute! ",
            goal.scorer, goal.team, goal.minute
        ));
    }

    commentary.push_str(&format!(
        "\n\nFinal Score: {} {} - {} {}",
        request.team_a, request.score_a, request.score_b, request.team_b
    ));

    if request.result_type == ResultType::Penalties {
        commentary.push_str(" (Decided on penalties)");
    }

    commentary.push_str(&format!(
        "\n\nWinner: {}",
        request.winner.as_deref().unwrap_or("Draw")
    ));

    commentary
}
