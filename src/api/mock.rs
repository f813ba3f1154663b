use super::ImageApi;
use crate::settings::Settings;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockImageApi {
    url_responses: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageApi {
    pub fn new() -> Self {
        Self {
            url_responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_url_response(self, url: String) -> Self {
        self.url_responses.lock().unwrap().push(url);
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageApi {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockImageApi {
    fn clone(&self) -> Self {
        Self {
            url_responses: Arc::clone(&self.url_responses),
            call_count: Arc::clone(&self.call_count),
            should_fail: Arc::clone(&self.should_fail),
        }
    }
}

#[async_trait]
impl ImageApi for MockImageApi {
    async fn request_image(&self, title: &str, _settings: &Settings) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if *self.should_fail.lock().unwrap() {
            return Err(Error::RemoteRequestFailed(
                "Mock API failure".to_string(),
            ));
        }

        let responses = self.url_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(format!("http://mock-api.example.com/images/{}.png", title.len()))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
