use mindtrack_core::guard::MAX_INPUT_LENGTH;
use serde_json::json;

use crate::util::{client, exit_error, print_response};

pub async fn run(api_url: &str, text: &str) -> i32 {
    // The boundary enforces this too; checking here avoids sending text a
    // well-behaved client already knows will be rejected.
    if text.chars().count() > MAX_INPUT_LENGTH {
        exit_error(
            &format!("Input must be {MAX_INPUT_LENGTH} characters or less"),
            Some("Shorten your check-in and try again."),
        );
    }
    if text.trim().is_empty() {
        exit_error("Please provide your thoughts to analyze", None);
    }

    let response = client()
        .post(format!("{api_url}/v1/checkins"))
        .json(&json!({ "text": text }))
        .send()
        .await
        .unwrap_or_else(|err| {
            exit_error(
                &format!("could not reach the API: {err}"),
                Some("Is the MindTrack API running? Check --api-url / MINDTRACK_API_URL."),
            )
        });
    print_response(response).await
}
