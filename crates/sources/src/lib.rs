use async_trait::async_trait;

use interface::{PriceSnapshot, SourceError, SourceId};

pub mod coingecko;

/// 가격 조회 능력 추상화
///
/// 전송 방식(일괄 REST, 심볼별 REST, 스트리밍)은 이 트레잇 뒤로 숨기고,
/// 수집 루프와 저장소는 구현체를 몰라도 되게 합니다.
/// 재시도 정책은 수집 루프의 몫이라 여기서는 구현하지 않습니다.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn id(&self) -> SourceId;

    /// 요청한 심볼들의 현재 가격 조회
    ///
    /// 응답에 없거나 형식이 깨진 심볼은 결과에서 조용히 빠집니다.
    /// 호출자는 부분 결과를 감수해야 합니다.
    async fn fetch(&self, symbols: &[String]) -> Result<Vec<PriceSnapshot>, SourceError>;
}

// Convenience re-exports
pub use coingecko::CoinGeckoClient;
