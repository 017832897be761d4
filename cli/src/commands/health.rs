use crate::util::{client, exit_error, print_response};

pub async fn run(api_url: &str) -> i32 {
    let response = client()
        .get(format!("{api_url}/health"))
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
