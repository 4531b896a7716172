use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::PriceSource;
use interface::{PriceSnapshot, SourceError, SourceId};

const BASE_URL: &str = "https://api.coingecko.com";

// 요청 타임아웃. 수집 루프가 멈추지 않도록 모든 요청에 상한을 겁니다
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// CoinGecko simple/price 응답: `{코인 id: {통화: 가격}}`
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// 테스트용 스텁 서버 등을 향하게 할 때 사용
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    fn id(&self) -> SourceId {
        SourceId::CoinGecko
    }

    async fn fetch(&self, symbols: &[String]) -> Result<Vec<PriceSnapshot>, SourceError> {
        // simple/price는 일괄 조회를 지원하므로 사이클당 요청 한 번
        let ids = symbols.join(",");
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies=usd",
            self.base_url, ids
        );

        let body = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let data: SimplePriceResponse = serde_json::from_str(&body)?;

        Ok(map_prices(symbols, &data))
    }
}

/// 응답 페이로드를 PriceSnapshot 목록으로 변환
///
/// 요청한 심볼만, 요청 순서대로 담습니다. 응답에 없거나 usd 항목이 없거나
/// 음수인 심볼은 건너뜁니다.
fn map_prices(symbols: &[String], data: &SimplePriceResponse) -> Vec<PriceSnapshot> {
    let now = Utc::now();
    let mut out = Vec::new();

    for symbol in symbols {
        let entry = match data.get(symbol) {
            Some(entry) => entry,
            None => continue,
        };

        let price = match entry.get("usd") {
            Some(price) => *price,
            None => continue,
        };

        if price < 0.0 {
            continue;
        }

        out.push(PriceSnapshot {
            symbol: symbol.clone(),
            price,
            observed_at: now,
        });
    }

    out
}
