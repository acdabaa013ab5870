use std::path::Path;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::types::CreateTranscriptionRequestArgs;
use async_openai::Client;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::request::AnalysisRequest;

const ANALYZE_TIMEOUT: Duration = Duration::from_secs(300);
const TRANSCRIBE_TIMEOUT: Duration = Duration::from_secs(120);
const TRANSCRIPTION_MODEL: &str = "whisper-1";

fn client(config: &ApiConfig) -> Client<OpenAIConfig> {
    Client::with_config(OpenAIConfig::new().with_api_key(config.api_key.clone()))
}

/// Sends one analysis request and returns the generated text. Any upstream
/// failure (network, auth, rate limit) surfaces as a single error kind; there
/// are no retries and no fallback model.
pub async fn analyze(config: &ApiConfig, request: AnalysisRequest) -> Result<String> {
    debug!(
        attachments = request.attachments.len(),
        model = %config.model,
        "sending analysis request"
    );
    let chat_request = request.into_chat_request(&config.model, config.max_tokens)?;

    let ai_client = client(config);
    let response = tokio::time::timeout(ANALYZE_TIMEOUT, ai_client.chat().create(chat_request))
        .await
        .map_err(|_| Error::Upstream("analysis request timed out".to_owned()))??;

    response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .ok_or_else(|| Error::Upstream("no content in response".to_owned()))
}

/// Transcribes an audio file with the hosted speech-to-text model.
pub async fn transcribe(config: &ApiConfig, audio_path: &Path) -> Result<String> {
    let audio_file = audio_path
        .to_str()
        .ok_or_else(|| Error::MediaDecode("audio path is not valid UTF-8".to_owned()))?;
    let request = CreateTranscriptionRequestArgs::default()
        .file(audio_file)
        .model(TRANSCRIPTION_MODEL)
        .build()?;

    let ai_client = client(config);
    let response = tokio::time::timeout(TRANSCRIBE_TIMEOUT, ai_client.audio().transcribe(request))
        .await
        .map_err(|_| Error::Upstream("transcription request timed out".to_owned()))??;

    Ok(response.text)
}
