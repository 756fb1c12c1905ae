//! HTTP client for the identity-scoring service.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use stampgate_types::{Address, Passport, StampRef, VerifiedStamp};
use tracing::{debug, warn};

use crate::config::ScorerConfig;
use crate::error::ScorerError;
use crate::types::{
    PassportResponse, ScoreResponse, ScoreStatus, SubmitPassportRequest, VerifyRequest,
    VerifyResponse,
};
use crate::ScoringService;

/// Header carrying the scoring API key.
const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the scoring service's registry API.
pub struct ScorerClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
    config: ScorerConfig,
}

impl ScorerClient {
    /// Create a client from a validated configuration.
    pub fn new(config: ScorerConfig) -> Result<Self, ScorerError> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ScorerError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    /// `GET {base}/registry/passport/{address}` -> Passport, `None` on 404.
    pub async fn get_passport(&self, address: &Address) -> Result<Option<Passport>, ScorerError> {
        let url = format!("{}/registry/passport/{}", self.base_url, address);
        debug!(%address, "fetching passport");

        let response = send(self.authorized(self.http_client.get(&url))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(%address, "no passport found");
            return Ok(None);
        }

        let body: PassportResponse = parse(check_status(response)?).await?;
        Ok(Some(Passport {
            address: address.clone(),
            stamps: body.stamps,
        }))
    }

    /// `POST {base}/registry/verify-stamps/{address}` -> verified stamps.
    ///
    /// Stamps the service flags as unverified are dropped.
    pub async fn post_verify_stamps(
        &self,
        address: &Address,
        stamps: &[StampRef],
    ) -> Result<Vec<VerifiedStamp>, ScorerError> {
        if stamps.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/registry/verify-stamps/{}", self.base_url, address);
        let request = VerifyRequest {
            scorer_id: &self.config.scorer_id,
            stamps,
        };
        debug!(%address, count = stamps.len(), "verifying stamps");

        let response = send(self.authorized(self.http_client.post(&url)).json(&request)).await?;
        let body: VerifyResponse = parse(check_status(response)?).await?;

        let mut verified = Vec::with_capacity(body.items.len());
        for entry in body.items {
            if let Some(stamp) = entry.into_verified()? {
                verified.push(stamp);
            }
        }
        Ok(verified)
    }

    /// `POST {base}/registry/submit-passport` -> score response.
    pub async fn submit_passport(&self, address: &Address) -> Result<ScoreResponse, ScorerError> {
        let url = format!("{}/registry/submit-passport", self.base_url);
        let request = SubmitPassportRequest {
            address: address.as_str(),
            scorer_id: &self.config.scorer_id,
        };
        let response = send(self.authorized(self.http_client.post(&url)).json(&request)).await?;
        parse(check_status(response)?).await
    }

    /// `GET {base}/registry/score/{scorer_id}/{address}` -> score response.
    pub async fn get_score(&self, address: &Address) -> Result<ScoreResponse, ScorerError> {
        let url = format!(
            "{}/registry/score/{}/{}",
            self.base_url, self.config.scorer_id, address
        );
        let response = send(self.authorized(self.http_client.get(&url))).await?;
        parse(check_status(response)?).await
    }

    /// Submit the passport and read its score, polling while it is processing.
    pub async fn score(&self, address: &Address) -> Result<f64, ScorerError> {
        let mut response = self.submit_passport(address).await?;
        let mut attempts = 0;

        while response.status == ScoreStatus::Processing {
            if attempts >= self.config.score_poll_attempts {
                warn!(%address, attempts, "passport score still processing");
                return Err(ScorerError::ScorePending { attempts });
            }
            tokio::time::sleep(self.config.score_poll_interval()).await;
            attempts += 1;
            response = self.get_score(address).await?;
        }

        match response.status {
            ScoreStatus::Done => response.score().ok_or_else(|| {
                ScorerError::InvalidResponse("score missing from DONE response".into())
            }),
            ScoreStatus::Error => Err(ScorerError::ScoreFailed(
                response.error.unwrap_or_else(|| "unknown scoring error".into()),
            )),
            ScoreStatus::Processing => Err(ScorerError::ScorePending { attempts }),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, &self.config.api_key)
    }
}

#[async_trait]
impl ScoringService for ScorerClient {
    async fn fetch_passport(&self, address: &Address) -> Result<Option<Passport>, ScorerError> {
        self.get_passport(address).await
    }

    async fn verify_stamps(
        &self,
        address: &Address,
        stamps: &[StampRef],
    ) -> Result<Vec<VerifiedStamp>, ScorerError> {
        self.post_verify_stamps(address, stamps).await
    }

    async fn passport_score(&self, address: &Address) -> Result<f64, ScorerError> {
        self.score(address).await
    }

    fn name(&self) -> &str {
        "passport-scorer"
    }
}

/// Send a request, classifying transport failures.
async fn send(request: RequestBuilder) -> Result<Response, ScorerError> {
    request.send().await.map_err(|e| {
        if e.is_timeout() {
            ScorerError::Unreachable(format!("request timed out: {e}"))
        } else if e.is_connect() {
            ScorerError::Unreachable(format!("connection failed: {e}"))
        } else {
            ScorerError::RequestFailed(e.to_string())
        }
    })
}

fn check_status(response: Response) -> Result<Response, ScorerError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ScorerError::Unauthorized(status.as_u16()));
    }
    if !status.is_success() {
        return Err(ScorerError::RequestFailed(format!("HTTP status {status}")));
    }
    Ok(response)
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ScorerError> {
    response
        .json()
        .await
        .map_err(|e| ScorerError::InvalidResponse(format!("failed to parse response: {e}")))
}
