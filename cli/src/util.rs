use serde_json::json;

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

pub fn exit_error(message: &str, hint: Option<&str>) -> ! {
    let mut err = json!({
        "error": "cli_error",
        "message": message
    });
    if let Some(hint) = hint {
        err["hint"] = json!(hint);
    }
    eprintln!("{}", serde_json::to_string_pretty(&err).unwrap());
    std::process::exit(1);
}

/// Print the response body as pretty JSON. Returns the process exit code:
/// 0 for 2xx, 1 otherwise (API errors are already structured JSON).
pub async fn print_response(response: reqwest::Response) -> i32 {
    let ok = response.status().is_success();
    let body = response.text().await.unwrap_or_default();

    if body.is_empty() {
        if !ok {
            eprintln!("{}", json!({ "error": "cli_error", "message": "empty response" }));
        }
        return if ok { 0 } else { 1 };
    }

    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => {
            let pretty = serde_json::to_string_pretty(&value).unwrap();
            if ok {
                println!("{pretty}");
            } else {
                eprintln!("{pretty}");
            }
        }
        Err(_) => println!("{body}"),
    }

    if ok { 0 } else { 1 }
}
