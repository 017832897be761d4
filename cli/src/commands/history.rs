use serde::Deserialize;
use serde_json::json;

use crate::util::{client, exit_error, print_response};

#[derive(Deserialize)]
struct TrendResponse {
    days: Vec<TrendDay>,
}

#[derive(Deserialize)]
struct TrendDay {
    date: String,
    #[serde(rename = "stressScore")]
    stress_score: Option<u8>,
    #[serde(rename = "hasData")]
    has_data: bool,
}

pub async fn list(api_url: &str) -> i32 {
    let response = get(api_url, "/v1/history").await;
    print_response(response).await
}

pub async fn clear(api_url: &str) -> i32 {
    let response = client()
        .delete(format!("{api_url}/v1/history"))
        .send()
        .await
        .unwrap_or_else(|err| unreachable_api(&err));
    if response.status().is_success() {
        println!("{}", json!({ "cleared": true }));
        0
    } else {
        print_response(response).await
    }
}

/// Render the 7 daily buckets as a small text chart, oldest first.
pub async fn trend(api_url: &str) -> i32 {
    let response = get(api_url, "/v1/history/trend").await;
    if !response.status().is_success() {
        return print_response(response).await;
    }

    let trend: TrendResponse = match response.json().await {
        Ok(trend) => trend,
        Err(err) => exit_error(&format!("unexpected trend response: {err}"), None),
    };

    for day in &trend.days {
        match (day.has_data, day.stress_score) {
            (true, Some(score)) => {
                let bar = "#".repeat(usize::from(score));
                println!("{:<12} {:<10} {}/10", day.date, bar, score);
            }
            _ => println!("{:<12} {:<10} no data", day.date, ""),
        }
    }
    0
}

async fn get(api_url: &str, path: &str) -> reqwest::Response {
    client()
        .get(format!("{api_url}{path}"))
        .send()
        .await
        .unwrap_or_else(|err| unreachable_api(&err))
}

fn unreachable_api(err: &reqwest::Error) -> ! {
    exit_error(
        &format!("could not reach the API: {err}"),
        Some("Is the MindTrack API running? Check --api-url / MINDTRACK_API_URL."),
    )
}
