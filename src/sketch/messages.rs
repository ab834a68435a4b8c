use serde::Deserialize;

/// Wire shape of the recognizer's reply. The service embeds its own status
/// code in the body alongside the recognized equation and its solution; the
/// solution arrives as either a bare number or a string depending on the
/// service build, so it is read as a raw JSON value.
#[derive(Debug, Deserialize)]
struct PredictionReply {
    status: Option<u16>,
    equation: Option<String>,
    solution: Option<serde_json::Value>,
}

/// What a finished recognition attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    Recognized { equation: String, solution: String },
    Unavailable { message: String },
}

/// Outcome tagged with the sequence number of the request that produced it,
/// so the controller can drop replies that a newer request has overtaken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedOutcome {
    pub seq: u64,
    pub outcome: RecognitionOutcome,
}

/// Text shown to the user for the latest recognition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Result { equation: String, solution: String },
    Unavailable { message: String },
}

impl DisplayState {
    pub fn text(&self) -> String {
        match self {
            Self::Result { equation, solution } => format!("{equation} = {solution}"),
            Self::Unavailable { .. } => "recognizer unavailable".to_string(),
        }
    }

    pub fn from_outcome(outcome: RecognitionOutcome) -> Self {
        match outcome {
            RecognitionOutcome::Recognized { equation, solution } => {
                Self::Result { equation, solution }
            }
            RecognitionOutcome::Unavailable { message } => Self::Unavailable { message },
        }
    }
}

/// Parses a reply body into an outcome. Anything other than a well-formed
/// body with an embedded 200 status and both fields present counts as the
/// recognizer being unavailable; field presence is never assumed.
pub fn parse_reply(body: &str) -> RecognitionOutcome {
    let reply: PredictionReply = match serde_json::from_str(body) {
        Ok(reply) => reply,
        Err(err) => {
            return RecognitionOutcome::Unavailable {
                message: format!("malformed reply: {err}"),
            }
        }
    };

    if let Some(status) = reply.status {
        if status != 200 {
            return RecognitionOutcome::Unavailable {
                message: format!("recognizer reported status {status}"),
            };
        }
    }

    let (Some(equation), Some(solution)) = (reply.equation, reply.solution) else {
        return RecognitionOutcome::Unavailable {
            message: "reply is missing equation or solution".to_string(),
        };
    };

    let solution = match solution {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    };

    RecognitionOutcome::Recognized { equation, solution }
}
