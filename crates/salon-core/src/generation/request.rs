//! Request body sent to the generation proxy.
//!
//! The proxy forwards `contents` and `generationConfig` to the image model
//! and checks `accessCode` itself.

use crate::config::GenerationConfig;
use serde::{Deserialize, Serialize};

/// Instruction block sent ahead of the two images.
///
/// Image 1 is the customer portrait, image 2 the hairstyle reference.
pub const INSTRUCTION: &str = "You are a world-class hairstylist and photo retouching expert. \
Using Image 1 (a portrait of a person) and Image 2 (a reference hairstyle), generate the \
highest quality try-on image.

[Top priority: identity]
- Keep every facial feature of the person in Image 1 (eyes, nose, mouth, face shape) exactly \
as they are. The result must clearly be the same person.

[Hairstyle transfer and blending]
- Apply the hairstyle, length, colour and texture from Image 2 to the person in Image 1.
- Make the hairline, face line and the area around the ears connect naturally, with no visible seams.

[Output]
- A bright, clean hair salon setting, either a mirror shot or a portrait.
- Photorealistic and high detail, down to individual strands of hair.";

/// MIME type declared for both input images.
pub const INPUT_MIME_TYPE: &str = "image/jpeg";

/// Full request body for one generation attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub access_code: String,
    pub contents: Vec<RequestContent>,
    pub generation_config: RequestGenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

/// One part of the multi-part prompt.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Embedded base64 image with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestGenerationConfig {
    pub response_modalities: Vec<String>,
    pub image_config: ImageConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
    pub image_size: String,
}

impl GenerationRequest {
    /// Build the request for a subject photo and a style reference.
    ///
    /// Both payloads are bare base64 with no data-URI prefix.
    pub fn compose(
        access_code: &str,
        subject_photo: &str,
        style_reference: &str,
        config: &GenerationConfig,
    ) -> Self {
        Self {
            access_code: access_code.to_string(),
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text {
                        text: INSTRUCTION.to_string(),
                    },
                    RequestPart::inline(subject_photo),
                    RequestPart::inline(style_reference),
                ],
            }],
            generation_config: RequestGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: ImageConfig {
                    aspect_ratio: config.aspect_ratio.clone(),
                    image_size: config.image_size.clone(),
                },
            },
        }
    }
}

impl RequestPart {
    fn inline(data: &str) -> Self {
        RequestPart::InlineData {
            inline_data: InlineData {
                mime_type: INPUT_MIME_TYPE.to_string(),
                data: data.to_string(),
            },
        }
    }
}
