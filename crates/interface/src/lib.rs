use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    CoinGecko,
}

/// 한 번의 수집 사이클에서 관측된 단일 코인 가격
///
/// 저장 파일 포맷은 `{symbol, price, time}` 객체 배열이며,
/// `time` 키는 차트 등 외부 소비자와의 호환을 위해 유지합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub symbol: String,
    pub price: f64,
    #[serde(rename = "time")]
    pub observed_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
