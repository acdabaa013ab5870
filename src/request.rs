use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ImageUrlArgs,
};

use crate::error::{Error, Result};

/// Hard ceiling on image attachments per request, matching the host API's
/// limit. User-configured budgets are clamped to this.
pub const ATTACHMENT_CEILING: usize = 50;

/// One analysis request: an instruction followed by encoded frames in source
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub instruction: String,
    pub attachments: Vec<String>,
}

pub fn build(
    instruction: impl Into<String>,
    attachments: Vec<String>,
    max_attachments: usize,
) -> Result<AnalysisRequest> {
    let limit = max_attachments.min(ATTACHMENT_CEILING);
    if attachments.len() > limit {
        return Err(Error::TooManyAttachments {
            count: attachments.len(),
            limit,
        });
    }
    Ok(AnalysisRequest {
        instruction: instruction.into(),
        attachments,
    })
}

impl AnalysisRequest {
    /// Lowers the request into one user message: the instruction text part
    /// followed by one image part per attachment, order preserved.
    pub fn into_chat_request(
        self,
        model: &str,
        max_tokens: u32,
    ) -> Result<CreateChatCompletionRequest> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .max_tokens(max_tokens)
            .messages([ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Array(
                        [
                            vec![ChatCompletionRequestUserMessageContentPart::Text(
                                ChatCompletionRequestMessageContentPartTextArgs::default()
                                    .text(self.instruction)
                                    .build()?,
                            )],
                            self.attachments
                                .into_iter()
                                .map(|uri| -> std::result::Result<_, OpenAIError> {
                                    Ok(ChatCompletionRequestUserMessageContentPart::ImageUrl(
                                        ChatCompletionRequestMessageContentPartImageArgs::default()
                                            .image_url(ImageUrlArgs::default().url(uri).build()?)
                                            .build()?,
                                    ))
                                })
                                .collect::<std::result::Result<_, _>>()?,
                        ]
                        .concat(),
                    ))
                    .build()?,
            )])
            .build()?;
        Ok(request)
    }
}
