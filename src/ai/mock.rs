use super::{FileOutput, ImageProvider, ProviderOutput};
use crate::models::GenerationInput;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type MockResponse = std::result::Result<ProviderOutput, String>;

#[derive(Clone)]
pub struct MockImageProvider {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    prompt_failures: Arc<Mutex<HashMap<String, String>>>,
    inputs: Arc<Mutex<Vec<GenerationInput>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompt_failures: Arc::new(Mutex::new(HashMap::new())),
            inputs: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_output(self, output: ProviderOutput) -> Self {
        self.responses.lock().unwrap().push(Ok(output));
        self
    }

    pub fn with_failure(self, reason: String) -> Self {
        self.responses.lock().unwrap().push(Err(reason));
        self
    }

    /// Fail every call whose prompt matches, regardless of queued responses.
    pub fn with_failure_for_prompt(self, prompt: String, reason: String) -> Self {
        self.prompt_failures.lock().unwrap().insert(prompt, reason);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_inputs(&self) -> Vec<GenerationInput> {
        self.inputs.lock().unwrap().clone()
    }
}

impl Default for MockImageProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn run(&self, input: &GenerationInput) -> Result<ProviderOutput> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.inputs.lock().unwrap().push(input.clone());

        if let Some(reason) = self.prompt_failures.lock().unwrap().get(&input.prompt) {
            return Err(Error::AiProvider(reason.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(ProviderOutput::File(FileOutput::new(format!(
                "https://replicate.delivery/mock/{}.webp",
                count
            ))));
        }

        match &responses[(count - 1) % responses.len()] {
            Ok(output) => Ok(output.clone()),
            Err(reason) => Err(Error::AiProvider(reason.clone())),
        }
    }
}
