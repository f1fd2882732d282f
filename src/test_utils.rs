use std::time::Duration;

use reqwest::Url;

use crate::api::{ApiClient, ClientConfig};

/// Client pointed at `<base>/api/v1/templates/`, e.g. a mockito server.
pub fn client_for(base: &str) -> ApiClient {
    let templates_url = Url::parse(&format!("{base}/api/v1/templates/")).unwrap();
    ApiClient::new(ClientConfig {
        api_key: "test-key".to_owned(),
        templates_url,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}
