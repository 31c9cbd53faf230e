use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Deserialize, Debug)]
pub struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

impl BotApiResponse {
    fn into_result(self) -> Result<Self, TelegramError> {
        if !self.ok {
            Err(TelegramError::ApiError {
                description: self.description.unwrap_or_default(),
            })
        } else {
            Ok(self)
        }
    }
}

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("Telegram Bot API returned error: {description:?}")]
    ApiError { description: String },
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

pub struct TelegramBotApi {
    client: reqwest::Client,
}

impl TelegramBotApi {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn send_message(
        &self,
        token: &str,
        chat_id: &str,
        text: &str,
    ) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
        };

        let resp = self
            .client
            .post(format!("https://api.telegram.org/bot{token}/sendMessage"))
            .json(&request)
            .send()
            .await?;

        let resp: BotApiResponse = resp.json().await?;
        resp.into_result()?;
        Ok(())
    }
}
