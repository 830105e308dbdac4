//! Request validation and translation for the generation relay.
//!
//! Pure functions only: nothing here touches the network, so every rejection
//! is guaranteed to happen before a remote call.

use serde_json::Value;
use veo_types::{AspectRatio, GenerateVideoRequest, MAX_IMAGES};
use veo_vertex::{PredictInstance, PredictParameters, PredictRequest};

use crate::credential::SharedSecret;
use crate::error::ServerError;

pub const UNAUTHORIZED_MESSAGE: &str = "Contraseña no autorizada";
pub const PROMPT_REQUIRED_MESSAGE: &str = "Prompt is required";

/// A request that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub prompt: String,
    pub images: Vec<String>,
    pub aspect_ratio: AspectRatio,
}

/// Check a raw JSON body in order: credential, body shape, prompt, aspect
/// ratio, image count.
///
/// The credential is read from the untyped body, so a configured secret
/// answers 401 whatever else is wrong with the request. A `password` that is
/// not a string never matches.
pub fn validate(body: Value, secret: Option<&SharedSecret>) -> Result<ValidatedRequest, ServerError> {
    let password = body.get("password").and_then(Value::as_str);
    if secret.is_some_and(|s| !s.verify(password)) {
        return Err(ServerError::Unauthorized(UNAUTHORIZED_MESSAGE.to_owned()));
    }

    let request: GenerateVideoRequest = serde_json::from_value(body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid request body: {e}")))?;

    let prompt = request
        .prompt
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ServerError::BadRequest(PROMPT_REQUIRED_MESSAGE.to_owned()))?;

    let aspect_ratio = match request.aspect_ratio.as_deref() {
        None => AspectRatio::default(),
        Some(value) => {
            AspectRatio::parse(value).map_err(|e| ServerError::BadRequest(e.to_string()))?
        }
    };

    let images = request.images.unwrap_or_default();
    if images.len() > MAX_IMAGES {
        return Err(ServerError::BadRequest(format!(
            "At most {MAX_IMAGES} images are allowed"
        )));
    }

    Ok(ValidatedRequest {
        prompt,
        images,
        aspect_ratio,
    })
}

impl ValidatedRequest {
    /// The single-instance `:predict` body for this request.
    pub fn to_predict_request(&self) -> PredictRequest {
        PredictRequest::single(
            PredictInstance::new(self.prompt.as_str(), self.images.as_slice()),
            PredictParameters::new(self.aspect_ratio),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(prompt: Option<&str>, password: Option<&str>) -> GenerateVideoRequest {
        GenerateVideoRequest {
            prompt: prompt.map(str::to_owned),
            password: password.map(str::to_owned),
            ..Default::default()
        }
    }

    fn body(request: GenerateVideoRequest) -> Value {
        serde_json::to_value(request).unwrap()
    }

    fn message(err: ServerError) -> String {
        err.to_string()
    }

    #[test]
    fn credential_is_checked_before_prompt() {
        let secret = SharedSecret::new("hunter2");
        let err = validate(body(request(None, Some("wrong"))), secret.as_ref()).unwrap_err();
        assert!(matches!(err, ServerError::Unauthorized(_)));
        assert_eq!(message(err), UNAUTHORIZED_MESSAGE);

        let err = validate(body(request(Some("p"), None)), secret.as_ref()).unwrap_err();
        assert!(matches!(err, ServerError::Unauthorized(_)));
    }

    #[test]
    fn credential_wins_over_a_badly_typed_body() {
        let secret = SharedSecret::new("hunter2");
        for raw in [
            json!({ "prompt": "p", "password": 123 }),
            json!({ "prompt": "p", "images": "x" }),
            json!({ "prompt": 42 }),
            json!([]),
        ] {
            let err = validate(raw.clone(), secret.as_ref()).unwrap_err();
            assert!(matches!(err, ServerError::Unauthorized(_)), "{raw}");
        }
    }

    #[test]
    fn badly_typed_body_with_the_right_password_is_400() {
        let secret = SharedSecret::new("hunter2");
        let err = validate(
            json!({ "prompt": "p", "password": "hunter2", "images": "x" }),
            secret.as_ref(),
        )
        .unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
        assert!(message(err).starts_with("Invalid request body:"));
    }

    #[test]
    fn no_secret_means_no_credential_check() {
        assert!(validate(body(request(Some("p"), Some("anything"))), None).is_ok());
    }

    #[test]
    fn prompt_must_be_present_and_non_empty() {
        for prompt in [None, Some("")] {
            let err = validate(body(request(prompt, None)), None).unwrap_err();
            assert!(matches!(err, ServerError::BadRequest(_)));
            assert_eq!(message(err), PROMPT_REQUIRED_MESSAGE);
        }
        assert_eq!(validate(body(request(Some("  "), None)), None).unwrap().prompt, "  ");
    }

    #[test]
    fn aspect_ratio_defaults_and_rejects_unknown() {
        let ok = validate(body(request(Some("p"), None)), None).unwrap();
        assert_eq!(ok.aspect_ratio, AspectRatio::Landscape);

        let mut portrait = request(Some("p"), None);
        portrait.aspect_ratio = Some("9:16".into());
        assert_eq!(validate(body(portrait), None).unwrap().aspect_ratio, AspectRatio::Portrait);

        let mut square = request(Some("p"), None);
        square.aspect_ratio = Some("1:1".into());
        assert_eq!(
            message(validate(body(square), None).unwrap_err()),
            "Unsupported aspect ratio: 1:1"
        );
    }

    #[test]
    fn more_than_three_images_is_rejected() {
        let mut req = request(Some("p"), None);
        req.images = Some(vec!["A".into(); 4]);
        assert_eq!(
            message(validate(body(req), None).unwrap_err()),
            "At most 3 images are allowed"
        );
    }

    #[test]
    fn example_scenario_builds_the_expected_body() {
        let secret = SharedSecret::new("hunter2");
        let mut req = request(Some("a cat on a skateboard"), Some("hunter2"));
        req.images = Some(Vec::new());
        req.aspect_ratio = Some("16:9".into());

        let predict = validate(body(req), secret.as_ref()).unwrap().to_predict_request();
        assert_eq!(
            serde_json::to_value(&predict).unwrap(),
            json!({
                "instances": [{ "prompt": "a cat on a skateboard" }],
                "parameters": {
                    "sampleCount": 1,
                    "durationSeconds": 5,
                    "fps": 24,
                    "aspect_ratio": "16:9",
                    "enableAudio": false
                }
            })
        );
    }

    #[test]
    fn image_headers_are_stripped_in_order() {
        let mut req = request(Some("p"), None);
        req.images = Some(vec![
            "data:image/jpeg;base64,ONE".into(),
            "data:image/webp;base64,TWO".into(),
        ]);
        let predict = validate(body(req), None).unwrap().to_predict_request();
        let value = serde_json::to_value(&predict).unwrap();
        assert_eq!(
            value["instances"][0]["image_input_config"]["images"],
            json!([{ "imageBytes": "ONE" }, { "imageBytes": "TWO" }])
        );
    }
}
