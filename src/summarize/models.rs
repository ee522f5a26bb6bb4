// Request/response bodies for the Gemini generateContent endpoint.
// Only the fields we read are declared.

#[derive(serde::Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(serde::Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(serde::Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(serde::Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    // All text parts of the first candidate, concatenated. None when the
    // model produced nothing (blocked prompt, empty candidate, ...).
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// {"error": {"code": 400, "message": "API key not valid. ...", "status": "INVALID_ARGUMENT"}}
#[derive(serde::Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(serde::Deserialize)]
pub struct ApiError {
    pub message: String,
}
