// Analyze profile screenshot - vision analysis of a dating profile image

use async_trait::async_trait;

use super::{ask_backend, format_response};
use crate::providers::CompletionRequest;
use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamKind, ParamSpec, ToolArgs, ToolError};

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

pub struct AnalyzeProfileTool;

fn focus_instruction(analysis_type: &str) -> String {
    match analysis_type {
        "comprehensive" => "Cover every point in detail.".to_string(),
        "quick" => "Keep it brief: one or two lines per point.".to_string(),
        "strengths_only" => {
            "Focus on what already works; mention improvements only if critical.".to_string()
        }
        other => format!("Focus of the analysis: {}.", other),
    }
}

fn build_prompt(analysis_type: &str) -> String {
    format!(
        "Analyze this dating profile image and provide:\n\
        1. Attractiveness score (1-10)\n\
        2. 3-5 strengths of the profile\n\
        3. 3-5 areas for improvement\n\
        4. Any red flags you notice\n\
        5. Overall assessment\n\n\
        Be honest but constructive. Focus on photo quality, presentation, and dating appeal.\n\
        {}",
        focus_instruction(analysis_type)
    )
}

#[async_trait]
impl Tool for AnalyzeProfileTool {
    fn name(&self) -> &str {
        "analyze_profile_screenshot"
    }

    fn description(&self) -> &str {
        "Analyze a dating profile screenshot and provide detailed feedback. Accepts a base64-encoded image (data URLs allowed)."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required(
                "image_base64",
                "Base64 encoded image of the dating profile",
                ParamKind::Base64Blob,
            ),
            ParamSpec::optional(
                "analysis_type",
                "Type of analysis (comprehensive, quick, strengths_only)",
                ParamKind::String,
                "comprehensive",
            ),
        ]
    }

    async fn execute(&self, args: &ToolArgs, context: &ToolContext) -> Result<String, ToolError> {
        let encoded = args.require("image_base64")?.to_string();
        let analysis_type = args.require("analysis_type")?;

        // Invalid or oversized images never reach the backend
        let image = context.media.prepare(encoded).await?;

        let request = CompletionRequest::text(build_prompt(analysis_type))
            .with_image(image)
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE);
        let analysis = ask_backend(context, request).await?;

        Ok(format_response(
            "🔍 **Dating Profile Analysis**",
            &analysis,
            "💡 **Next Steps:**",
            &[
                "Use `improve_bio` to enhance your bio",
                "Try `generate_opener` for conversation starters",
                "Use `roast_profile` for honest feedback with humor",
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaError, MediaNormalizer, MediaPolicy};
    use crate::tools::implementations::test_support::{context_with, run, RecordingProvider};
    use base64::Engine;
    use serde_json::json;

    fn png_base64(width: u32, height: u32) -> String {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 120, 200]));
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        base64::engine::general_purpose::STANDARD.encode(buf.into_inner())
    }

    #[tokio::test]
    async fn test_image_sent_with_prompt() {
        let provider = RecordingProvider::new("Score: 8/10");
        let context = context_with(provider.clone());

        let text = run(
            &AnalyzeProfileTool,
            json!({"image_base64": png_base64(2000, 1000), "analysis_type": "quick"}),
            &context,
        )
        .await
        .unwrap();

        assert!(text.contains("Score: 8/10"));
        let request = provider.last_request();
        assert_eq!(request.image_count(), 1);
        assert_eq!(request.max_tokens, MAX_TOKENS);
        assert!(provider.last_prompt().contains("brief"));
    }

    #[tokio::test]
    async fn test_invalid_image_skips_backend() {
        let provider = RecordingProvider::new("unused");
        let context = context_with(provider.clone());

        let err = run(
            &AnalyzeProfileTool,
            json!({"image_base64": "bm90IGFuIGltYWdl"}),
            &context,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ToolError::Media(MediaError::InvalidImage(_))));
        assert!(!provider.was_called());
    }

    #[tokio::test]
    async fn test_oversized_image_skips_backend() {
        let provider = RecordingProvider::new("unused");
        let mut context = context_with(provider.clone());
        context.media = MediaNormalizer::new(MediaPolicy {
            max_bytes: 32,
            ..MediaPolicy::default()
        });

        let err = run(
            &AnalyzeProfileTool,
            json!({"image_base64": png_base64(128, 128)}),
            &context,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ToolError::Media(MediaError::ImageTooLarge { .. })));
        assert!(!provider.was_called());
    }
}
